//! Typed access to the parameter bag of a transform record.

use serde_json::{Map, Value};

use crate::error::{TransformError, TransformResult};

const NUMBER: &str = "a float or int";
const INTEGER: &str = "an integer";

/// Parameters of one record, tagged with the transform they belong to so
/// errors can name it.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    transform: &'static str,
    record: &'a Map<String, Value>,
}

impl<'a> Params<'a> {
    pub fn new(transform: &'static str, record: &'a Map<String, Value>) -> Self {
        Self { transform, record }
    }

    /// Optional numeric parameter. JSON integers and floats both qualify;
    /// `null`, booleans, strings, arrays and objects do not.
    pub fn number(&self, key: &'static str) -> TransformResult<Option<f64>> {
        match self.record.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.type_error(key, NUMBER)),
            Some(_) => Err(self.type_error(key, NUMBER)),
        }
    }

    /// Numeric parameter with a default when absent.
    pub fn number_or(&self, key: &'static str, default: f64) -> TransformResult<f64> {
        Ok(self.number(key)?.unwrap_or(default))
    }

    /// Numeric parameter that must be present.
    pub fn required_number(&self, key: &'static str) -> TransformResult<f64> {
        self.number(key)?
            .ok_or(TransformError::MissingParameter {
                transform: self.transform,
                parameter: key,
            })
    }

    /// Integer parameter with a default when absent. Floats such as `5.0`
    /// are rejected.
    pub fn integer_or(&self, key: &'static str, default: i64) -> TransformResult<i64> {
        match self.record.get(key) {
            None => Ok(default),
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_i64() {
                    Ok(v)
                } else if n.is_u64() {
                    // Beyond i64 is certainly beyond any bound we accept.
                    Ok(i64::MAX)
                } else {
                    Err(self.type_error(key, INTEGER))
                }
            }
            Some(_) => Err(self.type_error(key, INTEGER)),
        }
    }

    /// Reject `value` unless it lies in `[min, max]`.
    pub fn check_range(
        &self,
        key: &'static str,
        value: f64,
        min: f64,
        max: f64,
        bounds: &'static str,
    ) -> TransformResult<()> {
        if value < min || value > max {
            return Err(TransformError::ParameterRange {
                transform: self.transform,
                parameter: key,
                value,
                bounds,
            });
        }
        Ok(())
    }

    fn type_error(&self, key: &'static str, expected: &'static str) -> TransformError {
        TransformError::ParameterType {
            transform: self.transform,
            parameter: key,
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_number_accepts_int_and_float() {
        let rec = record(json!({"a": 2, "b": 0.5}));
        let p = Params::new("t", &rec);
        assert_eq!(p.number("a").unwrap(), Some(2.0));
        assert_eq!(p.number("b").unwrap(), Some(0.5));
        assert_eq!(p.number("c").unwrap(), None);
    }

    #[test]
    fn test_number_rejects_other_kinds() {
        let rec = record(json!({"s": "bright", "b": true, "n": null, "l": [1]}));
        let p = Params::new("t", &rec);
        for key in ["s", "b", "n", "l"] {
            assert!(matches!(
                p.number(key),
                Err(TransformError::ParameterType { .. })
            ));
        }
    }

    #[test]
    fn test_required_number_missing() {
        let rec = Map::new();
        let err = Params::new("brightness", &rec)
            .required_number("value")
            .unwrap_err();
        assert_eq!(
            err,
            TransformError::MissingParameter {
                transform: "brightness",
                parameter: "value"
            }
        );
    }

    #[test]
    fn test_integer_rejects_float() {
        let rec = record(json!({"w": 5.0, "h": 5}));
        let p = Params::new("box", &rec);
        assert!(matches!(
            p.integer_or("w", 7),
            Err(TransformError::ParameterType { .. })
        ));
        assert_eq!(p.integer_or("h", 7).unwrap(), 5);
        assert_eq!(p.integer_or("missing", 7).unwrap(), 7);
    }

    #[test]
    fn test_check_range_inclusive() {
        let rec = Map::new();
        let p = Params::new("t", &rec);
        assert!(p.check_range("v", 1.0, -1.0, 1.0, "between -1 and 1").is_ok());
        assert!(p.check_range("v", -1.0, -1.0, 1.0, "between -1 and 1").is_ok());
        assert!(p.check_range("v", 1.01, -1.0, 1.0, "between -1 and 1").is_err());
    }
}

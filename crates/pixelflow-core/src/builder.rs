//! Builds transforms from declarative `{ "type": ..., ...params }` records.
//!
//! Lookup is an exact, case-sensitive match against [`REGISTRY`]. Adding a
//! transform means adding a [`Transform`] variant and one entry here.

use serde_json::{Map, Value};

use crate::error::{TransformError, TransformResult};
use crate::transform::{BoxBlur, Brightness, Contrast, Params, Saturation, Sharpen, Sobel, Transform};

/// A declarative transform record: a JSON object with a `type` key and the
/// transform's parameters alongside it.
pub type TransformRecord = Map<String, Value>;

type Constructor = fn(&Params<'_>) -> TransformResult<Transform>;

/// Catalog name to constructor.
pub const REGISTRY: &[(&str, Constructor)] = &[
    (BoxBlur::NAME, build_box),
    (Sobel::NAME, build_sobel),
    (Sharpen::NAME, build_sharpen),
    (Brightness::NAME, build_brightness),
    (Contrast::NAME, build_contrast),
    (Saturation::NAME, build_saturation),
];

fn build_box(params: &Params<'_>) -> TransformResult<Transform> {
    BoxBlur::from_params(params).map(Transform::from)
}

fn build_sobel(_: &Params<'_>) -> TransformResult<Transform> {
    Ok(Transform::from(Sobel))
}

fn build_sharpen(params: &Params<'_>) -> TransformResult<Transform> {
    Sharpen::from_params(params).map(Transform::from)
}

fn build_brightness(params: &Params<'_>) -> TransformResult<Transform> {
    Brightness::from_params(params).map(Transform::from)
}

fn build_contrast(params: &Params<'_>) -> TransformResult<Transform> {
    Contrast::from_params(params).map(Transform::from)
}

fn build_saturation(params: &Params<'_>) -> TransformResult<Transform> {
    Saturation::from_params(params).map(Transform::from)
}

/// Names of every registered transform, in registry order.
pub fn transform_names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

/// Build and validate one transform.
///
/// # Errors
///
/// [`TransformError::UnknownTransform`] if `type` is missing, not a string,
/// or not registered; otherwise whatever the transform's own validation
/// reports.
pub fn build(record: &TransformRecord) -> TransformResult<Transform> {
    let type_name = match record.get("type") {
        Some(Value::String(name)) => name.as_str(),
        Some(other) => return Err(TransformError::UnknownTransform(other.to_string())),
        None => return Err(TransformError::UnknownTransform("<missing>".to_string())),
    };

    let (name, constructor) = REGISTRY
        .iter()
        .find(|(name, _)| *name == type_name)
        .ok_or_else(|| TransformError::UnknownTransform(type_name.to_string()))?;

    constructor(&Params::new(*name, record))
}

/// Build a transform from any JSON value, rejecting non-objects as unknown.
pub fn build_value(value: &Value) -> TransformResult<Transform> {
    match value {
        Value::Object(record) => build(record),
        other => Err(TransformError::UnknownTransform(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> TransformRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_builds_every_registered_name() {
        let records = [
            json!({"type": "box", "width": 3, "height": 5}),
            json!({"type": "sobel"}),
            json!({"type": "sharpen", "value": 2}),
            json!({"type": "brightness", "value": 0.1}),
            json!({"type": "contrast", "value": 1.5}),
            json!({"type": "saturation"}),
        ];
        for (rec, name) in records.iter().zip(transform_names()) {
            let transform = build(&record(rec.clone())).unwrap();
            assert_eq!(transform.name(), name);
        }
    }

    #[test]
    fn test_forwards_parameters() {
        let t = build(&record(json!({"type": "box", "width": 3, "height": 5}))).unwrap();
        match t {
            Transform::Box(blur) => assert_eq!(blur.size(), (3, 5)),
            other => panic!("expected box, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_typo() {
        let err = build(&record(json!({"type": "blurr"}))).unwrap_err();
        assert_eq!(err, TransformError::UnknownTransform("blurr".to_string()));
        assert!(err.to_string().contains("blurr"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(matches!(
            build(&record(json!({"type": "Sobel"}))),
            Err(TransformError::UnknownTransform(_))
        ));
    }

    #[test]
    fn test_missing_or_non_string_type() {
        assert!(matches!(
            build(&record(json!({"value": 1}))),
            Err(TransformError::UnknownTransform(_))
        ));
        assert!(matches!(
            build(&record(json!({"type": 3}))),
            Err(TransformError::UnknownTransform(_))
        ));
    }

    #[test]
    fn test_brightness_validation_errors() {
        assert!(matches!(
            build(&record(json!({"type": "brightness", "value": "bright"}))),
            Err(TransformError::ParameterType { .. })
        ));
        assert!(matches!(
            build(&record(json!({"type": "brightness", "value": 2.0}))),
            Err(TransformError::ParameterRange { .. })
        ));
    }

    #[test]
    fn test_build_value_rejects_non_object() {
        assert!(build_value(&json!("sobel")).is_err());
        assert!(build_value(&json!({"type": "sobel"})).is_ok());
    }

    #[test]
    fn test_registry_names_unique() {
        let mut names: Vec<_> = transform_names().collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
        assert_eq!(count, 6);
    }
}

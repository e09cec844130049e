//! Error types for building transforms.

use thiserror::Error;

/// Errors raised while validating a transform record.
///
/// All of these are produced before any pixel is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A parameter has the wrong JSON kind (e.g. a string where a number is required).
    #[error("{transform}: `{parameter}` must be {expected}")]
    ParameterType {
        transform: &'static str,
        parameter: &'static str,
        expected: &'static str,
    },

    /// A parameter is outside its documented bounds.
    #[error("{transform}: `{parameter}` must be {bounds}, got {value}")]
    ParameterRange {
        transform: &'static str,
        parameter: &'static str,
        value: f64,
        bounds: &'static str,
    },

    /// A required parameter is absent.
    #[error("{transform}: missing required parameter `{parameter}`")]
    MissingParameter {
        transform: &'static str,
        parameter: &'static str,
    },

    /// The record's `type` does not name a known transform.
    #[error("Undefined operation type: {0}")]
    UnknownTransform(String),
}

/// Result type for transform construction.
pub type TransformResult<T> = Result<T, TransformError>;

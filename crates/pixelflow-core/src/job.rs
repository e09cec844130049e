//! JSON job files.
//!
//! A job names one input image, where the result goes, and the operations to
//! run on it:
//!
//! ```json
//! { "input": "in.png", "output": "out/result.png", "display": false,
//!   "operations": [ {"type": "box", "width": 5}, {"type": "sobel"} ] }
//! ```
//!
//! Every operation is built while the job loads, so a job that loads is a job
//! that can run.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::builder::build;
use crate::error::TransformError;
use crate::pipeline::Pipeline;

/// Accepted input extensions, compared case-insensitively.
pub const INPUT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Invalid JSON in job: {0}")]
    InvalidJson(String),

    #[error("Invalid input image: {0}")]
    InvalidInput(String),

    #[error("Job must set `output` or enable `display`")]
    NoSink,

    #[error("`operations` must be a list")]
    OperationsNotList,

    #[error("Operation {index} must be an object")]
    OperationNotObject { index: usize },

    #[error("Operation {index}: {source}")]
    Operation {
        index: usize,
        #[source]
        source: TransformError,
    },
}

#[derive(Debug, Deserialize)]
struct RawJob {
    input: Option<String>,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    display: Value,
    #[serde(default)]
    operations: Option<Value>,
}

/// A validated job.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub input: PathBuf,
    /// `None` when the result should not be written.
    pub output: Option<PathBuf>,
    pub display: bool,
    pub pipeline: Pipeline,
}

impl Job {
    /// Load a job file. Relative image paths resolve against the current
    /// working directory.
    pub fn from_path(path: &Path) -> Result<Self, JobError> {
        if !path.is_file() {
            return Err(JobError::ConfigNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| JobError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let base_dir = std::env::current_dir().map_err(|e| JobError::Io {
            path: PathBuf::from("."),
            message: e.to_string(),
        })?;
        debug!("loading job {}", path.display());
        Self::from_json_str(&text, &base_dir)
    }

    /// Parse a job from JSON text. Relative image paths resolve against
    /// `base_dir`.
    pub fn from_json_str(text: &str, base_dir: &Path) -> Result<Self, JobError> {
        let raw: RawJob =
            serde_json::from_str(text).map_err(|e| JobError::InvalidJson(e.to_string()))?;

        let input = resolve_input(raw.input.as_deref(), base_dir)?;
        let display = is_truthy(&raw.display);
        let output = raw
            .output
            .filter(|o| !o.is_empty())
            .map(|o| base_dir.join(o));
        if output.is_none() && !display {
            return Err(JobError::NoSink);
        }
        let pipeline = build_operations(raw.operations.as_ref())?;

        debug!(
            "job: {} -> {:?}, {} operation(s)",
            input.display(),
            output,
            pipeline.len()
        );
        Ok(Self {
            input,
            output,
            display,
            pipeline,
        })
    }
}

/// `false`, `null`, `0`, `""`, `[]` and `{}` are false; anything else is true.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn resolve_input(input: Option<&str>, base_dir: &Path) -> Result<PathBuf, JobError> {
    let input = match input {
        Some(s) if !s.is_empty() => base_dir.join(s),
        _ => return Err(JobError::InvalidInput("`input` is required".to_string())),
    };
    if !input.is_file() {
        return Err(JobError::InvalidInput(format!(
            "{} does not exist",
            input.display()
        )));
    }
    let supported = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| INPUT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if !supported {
        return Err(JobError::InvalidInput(format!(
            "{} must be one of .png, .jpg, .jpeg",
            input.display()
        )));
    }
    Ok(input)
}

fn build_operations(operations: Option<&Value>) -> Result<Pipeline, JobError> {
    let items = match operations {
        None | Some(Value::Null) => return Ok(Pipeline::default()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(JobError::OperationsNotList),
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let record = item
                .as_object()
                .ok_or(JobError::OperationNotObject { index })?;
            build(record).map_err(|source| JobError::Operation { index, source })
        })
        .collect()
}

//! Pixelflow Core - Image transform engine
//!
//! This crate provides reflect-padded convolution, a catalog of image
//! transforms built from declarative records, and a pipeline runner that
//! applies them in order. Image files and JSON job descriptions are handled
//! by the `decode`, `encode` and `job` modules.

pub mod buffer;
pub mod builder;
pub mod decode;
pub mod encode;
pub mod error;
pub mod job;
pub mod kernel;
pub mod luminance;
pub mod pipeline;
pub mod transform;

pub use buffer::{ColorMode, ImageBuffer};
pub use builder::{build, transform_names, TransformRecord};
pub use error::{TransformError, TransformResult};
pub use job::{Job, JobError};
pub use kernel::{convolve, Kernel};
pub use pipeline::Pipeline;
pub use transform::Transform;

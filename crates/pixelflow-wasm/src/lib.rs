//! Pixelflow WASM - WebAssembly bindings for Pixelflow
//!
//! This crate exposes the pixelflow-core transform pipeline to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - the `JsImage` wrapper for 8-bit image data
//! - `pipeline` - run a list of transform records over an image
//! - `encode` - PNG export
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImage, run_pipeline_json, encode_png } from '@pixelflow/wasm';
//!
//! await init();
//!
//! const image = new JsImage(width, height, 3, rgbBytes);
//! const out = run_pipeline_json(image, '[{"type": "sharpen", "value": 1.5}]');
//! const png = encode_png(out);
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod pipeline;
mod types;

pub use encode::encode_png;
pub use pipeline::{run_pipeline, run_pipeline_json};
pub use types::JsImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Names of the available transforms, in catalog order.
#[wasm_bindgen]
pub fn transform_names() -> Vec<String> {
    pixelflow_core::transform_names().map(String::from).collect()
}

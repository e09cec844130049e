//! Pipeline WASM bindings.
//!
//! Operations arrive either as a JavaScript array of records or as JSON text.
//! Both are validated in full before any pixel is touched.
//!
//! ```typescript
//! import { JsImage, run_pipeline } from '@pixelflow/wasm';
//!
//! const image = new JsImage(width, height, 3, rgbBytes);
//! const edges = run_pipeline(image, [{ type: 'box', width: 5 }, { type: 'sobel' }]);
//! console.log(edges.channels); // 1
//! ```

use pixelflow_core::builder::build_value;
use pixelflow_core::Pipeline;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::types::JsImage;

/// Run `operations` (an array of `{ type, ...params }` records) over `image`.
///
/// # Errors
/// Returns an error if the operations are not an array, any record fails
/// validation, or the image data is inconsistent.
#[wasm_bindgen]
pub fn run_pipeline(image: &JsImage, operations: JsValue) -> Result<JsImage, JsValue> {
    let operations: Value = serde_wasm_bindgen::from_value(operations)
        .map_err(|e| JsValue::from_str(&format!("Invalid operations: {}", e)))?;
    run_operations(image, &operations).map_err(|e| JsValue::from_str(&e))
}

/// Same as [`run_pipeline`], with the operations given as JSON text.
#[wasm_bindgen]
pub fn run_pipeline_json(image: &JsImage, operations_json: &str) -> Result<JsImage, JsValue> {
    let operations: Value = serde_json::from_str(operations_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid operations JSON: {}", e)))?;
    run_operations(image, &operations).map_err(|e| JsValue::from_str(&e))
}

pub(crate) fn parse_operations(operations: &Value) -> Result<Pipeline, String> {
    let items = operations
        .as_array()
        .ok_or_else(|| "Operations must be an array".to_string())?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            build_value(item).map_err(|e| format!("Operation {}: {}", index, e))
        })
        .collect()
}

pub(crate) fn run_operations(image: &JsImage, operations: &Value) -> Result<JsImage, String> {
    let pipeline = parse_operations(operations)?;
    let buffer = image.to_buffer()?;
    Ok(JsImage::from_buffer(&pipeline.run(buffer)))
}


/// WASM-specific tests that require JsValue.
///
/// These can only run on wasm32 targets. Use `wasm-pack test` to run them.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_run_pipeline_json() {
        let image = JsImage::new(3, 3, 3, vec![0u8; 27]);
        let out = run_pipeline_json(&image, r#"[{"type": "box", "width": 3, "height": 3}]"#).unwrap();
        assert_eq!(out.pixels(), vec![0u8; 27]);
    }

    #[wasm_bindgen_test]
    fn test_run_pipeline_rejects_non_array() {
        let image = JsImage::new(3, 3, 1, vec![0u8; 9]);
        assert!(run_pipeline(&image, JsValue::from_f64(3.0)).is_err());
    }

    #[wasm_bindgen_test]
    fn test_run_pipeline_invalid_json() {
        let image = JsImage::new(1, 1, 1, vec![0]);
        assert!(run_pipeline_json(&image, "[{").is_err());
    }
}

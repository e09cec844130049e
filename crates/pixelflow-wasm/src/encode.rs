//! Image encoding WASM bindings.

use pixelflow_core::encode;
use wasm_bindgen::prelude::*;

use crate::types::JsImage;

/// Encode a JsImage as PNG bytes.
///
/// Grayscale images are written as 8-bit grayscale PNGs, RGB images as RGB8.
///
/// ```typescript
/// const png = encode_png(edges);
/// const blob = new Blob([png], { type: 'image/png' });
/// ```
#[wasm_bindgen]
pub fn encode_png(image: &JsImage) -> Result<Vec<u8>, JsValue> {
    encode_png_bytes(image).map_err(|e| JsValue::from_str(&e))
}

pub(crate) fn encode_png_bytes(image: &JsImage) -> Result<Vec<u8>, String> {
    let buffer = image.to_buffer()?;
    encode::encode_png(&buffer).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_magic_bytes() {
        let img = JsImage::new(10, 10, 3, vec![128u8; 10 * 10 * 3]);
        let png = encode_png_bytes(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_encode_png_zero_size() {
        let img = JsImage::new(0, 10, 1, Vec::new());
        assert!(encode_png_bytes(&img).is_err());
    }
}

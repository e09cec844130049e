//! WASM-compatible image type.
//!
//! Images cross the JavaScript boundary as 8-bit interleaved pixels with an
//! explicit channel count: 1 for grayscale, 3 for RGB.

use pixelflow_core::{encode, ImageBuffer};
use wasm_bindgen::prelude::*;

/// An 8-bit image handed to or returned from the engine.
///
/// `pixels()` copies the data into a JavaScript `Uint8Array`.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct JsImage {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from dimensions, channel count (1 or 3) and
    /// row-major interleaved pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            channels,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// 1 for grayscale, 3 for RGB
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Pixel data as a Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsImage {
    /// Convert to a normalized engine buffer.
    pub(crate) fn to_buffer(&self) -> Result<ImageBuffer, String> {
        let (width, height) = (self.width as usize, self.height as usize);
        let buffer = match self.channels {
            1 => ImageBuffer::from_luma8(width, height, &self.pixels),
            3 => ImageBuffer::from_rgb8(width, height, &self.pixels),
            n => return Err(format!("Unsupported channel count: {} (expected 1 or 3)", n)),
        };
        buffer.ok_or_else(|| {
            format!(
                "Pixel data length {} does not match {}x{}x{}",
                self.pixels.len(),
                self.width,
                self.height,
                self.channels
            )
        })
    }

    pub(crate) fn from_buffer(buffer: &ImageBuffer) -> Self {
        Self {
            width: buffer.width() as u32,
            height: buffer.height() as u32,
            channels: buffer.mode().channels() as u8,
            pixels: encode::to_bytes(buffer),
        }
    }
}

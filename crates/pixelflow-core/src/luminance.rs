//! Luminance calculation using ITU-R BT.601 coefficients.
//!
//! Shared by the Sobel transform (grayscale conversion) and the saturation
//! transform (desaturation target).

use crate::buffer::{ColorMode, ImageBuffer};

/// ITU-R BT.601 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.114;

/// Calculate luminance from normalized RGB values.
#[inline]
pub fn calculate_luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}

/// Per-pixel luminance plane of a buffer.
///
/// A grayscale buffer already is its luminance and is returned as is.
pub fn luminance_plane(buffer: &ImageBuffer) -> Vec<f32> {
    match buffer.mode() {
        ColorMode::Gray => buffer.samples().to_vec(),
        ColorMode::Rgb => buffer
            .samples()
            .chunks_exact(3)
            .map(|px| calculate_luminance(px[0], px[1], px[2]))
            .collect(),
    }
}

/// Collapse a buffer to a single-channel grayscale buffer.
pub fn to_grayscale(buffer: &ImageBuffer) -> ImageBuffer {
    if buffer.is_grayscale() {
        return buffer.clone();
    }
    ImageBuffer::gray_from_plane(buffer.width(), buffer.height(), luminance_plane(buffer))
}

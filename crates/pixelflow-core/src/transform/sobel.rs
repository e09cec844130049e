//! Sobel edge magnitude.
//!
//! The image is reduced to luminance, differentiated along x and y with the
//! 3x3 Sobel kernels, and the gradient magnitude is normalized by its global
//! maximum. The result is always a single-channel buffer, so any transform
//! that follows sees a grayscale image.

use crate::buffer::ImageBuffer;
use crate::kernel::{convolve_plane, Kernel, SOBEL_X, SOBEL_Y};
use crate::luminance::to_grayscale;

/// Added to the normalization divisor so a flat image divides by a non-zero value.
pub const NORMALIZATION_EPSILON: f32 = 1e-8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sobel;

impl Sobel {
    pub const NAME: &'static str = "sobel";

    pub fn apply(&self, image: ImageBuffer) -> ImageBuffer {
        let gray = to_grayscale(&image);
        let (width, height) = (gray.width(), gray.height());

        let gx = convolve_plane(gray.samples(), width, height, &Kernel::from_rows(SOBEL_X));
        let gy = convolve_plane(gray.samples(), width, height, &Kernel::from_rows(SOBEL_Y));

        let magnitude = ImageBuffer::gray_from_plane(
            width,
            height,
            gx.iter().zip(&gy).map(|(x, y)| x.hypot(*y)).collect(),
        );
        let divisor = magnitude.max_sample() + NORMALIZATION_EPSILON;
        magnitude.map(|m| m / divisor)
    }
}

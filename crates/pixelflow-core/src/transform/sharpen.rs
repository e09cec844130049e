//! Unsharp-mask sharpening.
//!
//! ```text
//! blurred = box_blur(image, 2 * SHARPEN_RADIUS + 1)
//! output  = clamp(image + alpha * (image - blurred), 0, 1)
//! ```

use crate::buffer::{ImageBuffer, PIXEL_MAX, PIXEL_MIN};
use crate::error::TransformResult;
use crate::kernel::{convolve, Kernel};

use super::params::Params;

/// Radius of the box blur used to extract the high-frequency mask.
pub const SHARPEN_RADIUS: usize = 2;

pub const DEFAULT_SHARPEN_AMOUNT: f64 = 1.0;

pub const MAX_SHARPEN_AMOUNT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sharpen {
    alpha: f32,
}

impl Sharpen {
    pub const NAME: &'static str = "sharpen";

    pub fn from_params(params: &Params<'_>) -> TransformResult<Self> {
        let alpha = params.number_or("value", DEFAULT_SHARPEN_AMOUNT)?;
        params.check_range("value", alpha, 0.0, MAX_SHARPEN_AMOUNT, "between 0 and 10")?;
        Ok(Self {
            alpha: alpha as f32,
        })
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn apply(&self, image: ImageBuffer) -> ImageBuffer {
        let size = 2 * SHARPEN_RADIUS + 1;
        let blurred = convolve(&image, &Kernel::normalized_box(size, size));
        let alpha = self.alpha;
        let data = image
            .samples()
            .iter()
            .zip(blurred.samples())
            .map(|(&s, &b)| (s + alpha * (s - b)).clamp(PIXEL_MIN, PIXEL_MAX))
            .collect();
        image.with_samples(data)
    }
}

impl Default for Sharpen {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_SHARPEN_AMOUNT as f32,
        }
    }
}

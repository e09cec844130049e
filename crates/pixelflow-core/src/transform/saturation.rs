//! Saturation: scale each pixel's distance from its luminance.

use crate::buffer::{ColorMode, ImageBuffer, PIXEL_MAX, PIXEL_MIN};
use crate::error::TransformResult;
use crate::luminance::calculate_luminance;

use super::params::Params;

pub const DEFAULT_SATURATION: f64 = 1.0;

/// `luminance + value * (sample - luminance)`, clamped to `[0, 1]`.
///
/// `0` desaturates to gray, `1` keeps the image, larger values boost color.
/// A grayscale buffer is its own luminance, so it is only clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturation {
    value: f32,
}

impl Saturation {
    pub const NAME: &'static str = "saturation";

    pub fn from_params(params: &Params<'_>) -> TransformResult<Self> {
        let value = params.number_or("value", DEFAULT_SATURATION)?;
        params.check_range("value", value, 0.0, f64::INFINITY, "non-negative")?;
        Ok(Self {
            value: value as f32,
        })
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn apply(&self, image: ImageBuffer) -> ImageBuffer {
        if image.mode() == ColorMode::Gray {
            return image.clamped();
        }

        let factor = self.value;
        let mut data = image.samples().to_vec();
        for px in data.chunks_exact_mut(3) {
            let lum = calculate_luminance(px[0], px[1], px[2]);
            for s in px.iter_mut() {
                *s = (lum + factor * (*s - lum)).clamp(PIXEL_MIN, PIXEL_MAX);
            }
        }
        image.with_samples(data)
    }
}

impl Default for Saturation {
    fn default() -> Self {
        Self {
            value: DEFAULT_SATURATION as f32,
        }
    }
}

//! Linear contrast around mid-gray.

use crate::buffer::{ImageBuffer, PIXEL_MAX, PIXEL_MIN};
use crate::error::TransformResult;

use super::params::Params;

/// Fixed point of the contrast curve.
pub const CONTRAST_MIDPOINT: f32 = 0.5;

/// Maps every sample `s` to `clamp((s - 0.5) * value + 0.5, 0, 1)`.
///
/// Any finite multiplier is accepted, including negative ones, which invert
/// the image around mid-gray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contrast {
    value: f32,
}

impl Contrast {
    pub const NAME: &'static str = "contrast";

    pub fn from_params(params: &Params<'_>) -> TransformResult<Self> {
        let value = params.required_number("value")?;
        Ok(Self {
            value: value as f32,
        })
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn apply(&self, image: ImageBuffer) -> ImageBuffer {
        let factor = self.value;
        image.map(|s| {
            ((s - CONTRAST_MIDPOINT) * factor + CONTRAST_MIDPOINT).clamp(PIXEL_MIN, PIXEL_MAX)
        })
    }
}

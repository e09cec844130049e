//! Additive brightness offset.

use crate::buffer::{ImageBuffer, PIXEL_MAX, PIXEL_MIN};
use crate::error::TransformResult;

use super::params::Params;

/// Adds `value` to every sample and clamps to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brightness {
    value: f32,
}

impl Brightness {
    pub const NAME: &'static str = "brightness";

    pub fn from_params(params: &Params<'_>) -> TransformResult<Self> {
        let value = params.required_number("value")?;
        params.check_range("value", value, -1.0, 1.0, "between -1 and 1")?;
        Ok(Self {
            value: value as f32,
        })
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn apply(&self, image: ImageBuffer) -> ImageBuffer {
        let offset = self.value;
        image.map(|s| (s + offset).clamp(PIXEL_MIN, PIXEL_MAX))
    }
}

//! Box blur: mean of a rectangular neighborhood.

use crate::buffer::ImageBuffer;
use crate::error::TransformResult;
use crate::kernel::{convolve, Kernel};

use super::params::Params;

/// Default kernel width and height.
pub const DEFAULT_BLUR_SIZE: i64 = 7;

/// Largest accepted kernel width or height.
pub const MAX_BLUR_SIZE: i64 = 1000;

/// Normalized all-ones kernel of `width` rows by `height` columns.
///
/// `width` is the vertical extent of the kernel and `height` the horizontal
/// one, so `{"width": 3, "height": 1}` averages each pixel with the pixels
/// above and below it.
///
/// Even sizes are accepted and promoted to the next odd size when the kernel
/// is built, so `width = 4` blurs exactly like `width = 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxBlur {
    width: usize,
    height: usize,
}

impl BoxBlur {
    pub const NAME: &'static str = "box";

    pub fn from_params(params: &Params<'_>) -> TransformResult<Self> {
        let width = params.integer_or("width", DEFAULT_BLUR_SIZE)?;
        let height = params.integer_or("height", DEFAULT_BLUR_SIZE)?;
        Ok(Self {
            width: validate_size(params, "width", width)?,
            height: validate_size(params, "height", height)?,
        })
    }

    /// Requested `(width, height)`, before odd promotion.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn kernel(&self) -> Kernel {
        Kernel::normalized_box(self.height, self.width)
    }

    pub fn apply(&self, image: ImageBuffer) -> ImageBuffer {
        convolve(&image, &self.kernel())
    }
}

impl Default for BoxBlur {
    fn default() -> Self {
        Self {
            width: DEFAULT_BLUR_SIZE as usize,
            height: DEFAULT_BLUR_SIZE as usize,
        }
    }
}

fn validate_size(params: &Params<'_>, key: &'static str, value: i64) -> TransformResult<usize> {
    params.check_range(
        key,
        value as f64,
        1.0,
        MAX_BLUR_SIZE as f64,
        "a positive integer no greater than 1000",
    )?;
    Ok(value as usize)
}

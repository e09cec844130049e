//! The transform catalog.
//!
//! Every transform validates its parameters when it is constructed and is
//! immutable afterwards. Applying a transform consumes the current buffer and
//! returns its replacement with the same height and width.
//!
//! | name         | parameters                    | effect                                  |
//! |--------------|-------------------------------|-----------------------------------------|
//! | `box`        | `width`, `height` (int, 7)    | mean filter, even sizes rounded up      |
//! | `sobel`      | none                          | normalized gradient magnitude, grayscale|
//! | `sharpen`    | `value` (0..=10, 1.0)         | unsharp mask with a 5x5 box blur        |
//! | `brightness` | `value` (-1..=1, required)    | additive offset                         |
//! | `contrast`   | `value` (required)            | scale around mid-gray                   |
//! | `saturation` | `value` (>= 0, 1.0)           | scale distance from luminance           |

mod box_blur;
mod brightness;
mod contrast;
mod params;
mod saturation;
mod sharpen;
mod sobel;

pub use box_blur::{BoxBlur, DEFAULT_BLUR_SIZE, MAX_BLUR_SIZE};
pub use brightness::Brightness;
pub use contrast::{Contrast, CONTRAST_MIDPOINT};
pub use params::Params;
pub use saturation::{Saturation, DEFAULT_SATURATION};
pub use sharpen::{Sharpen, DEFAULT_SHARPEN_AMOUNT, MAX_SHARPEN_AMOUNT, SHARPEN_RADIUS};
pub use sobel::{Sobel, NORMALIZATION_EPSILON};

use crate::buffer::ImageBuffer;

/// A validated transform, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    Box(BoxBlur),
    Sobel(Sobel),
    Sharpen(Sharpen),
    Brightness(Brightness),
    Contrast(Contrast),
    Saturation(Saturation),
}

impl Transform {
    /// The catalog name this transform is registered under.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Box(_) => BoxBlur::NAME,
            Transform::Sobel(_) => Sobel::NAME,
            Transform::Sharpen(_) => Sharpen::NAME,
            Transform::Brightness(_) => Brightness::NAME,
            Transform::Contrast(_) => Contrast::NAME,
            Transform::Saturation(_) => Saturation::NAME,
        }
    }

    pub fn apply(&self, image: ImageBuffer) -> ImageBuffer {
        match self {
            Transform::Box(t) => t.apply(image),
            Transform::Sobel(t) => t.apply(image),
            Transform::Sharpen(t) => t.apply(image),
            Transform::Brightness(t) => t.apply(image),
            Transform::Contrast(t) => t.apply(image),
            Transform::Saturation(t) => t.apply(image),
        }
    }
}

impl From<BoxBlur> for Transform {
    fn from(t: BoxBlur) -> Self {
        Transform::Box(t)
    }
}

impl From<Sobel> for Transform {
    fn from(t: Sobel) -> Self {
        Transform::Sobel(t)
    }
}

impl From<Sharpen> for Transform {
    fn from(t: Sharpen) -> Self {
        Transform::Sharpen(t)
    }
}

impl From<Brightness> for Transform {
    fn from(t: Brightness) -> Self {
        Transform::Brightness(t)
    }
}

impl From<Contrast> for Transform {
    fn from(t: Contrast) -> Self {
        Transform::Contrast(t)
    }
}

impl From<Saturation> for Transform {
    fn from(t: Saturation) -> Self {
        Transform::Saturation(t)
    }
}

//! Ordered application of transforms to a single image.
//!
//! A [`Pipeline`] is built completely before any pixel work happens, so a
//! pipeline either validates in full or fails without touching the image.
//! Running it threads one buffer through every step in order; each step sees
//! the buffer (and therefore the channel layout) produced by the step before.

use log::debug;

use crate::buffer::ImageBuffer;
use crate::builder::{build, TransformRecord};
use crate::error::TransformResult;
use crate::transform::Transform;

/// An ordered list of validated transforms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    transforms: Vec<Transform>,
}

impl Pipeline {
    pub fn new(transforms: Vec<Transform>) -> Self {
        Self { transforms }
    }

    /// Build every record, stopping at the first invalid one.
    pub fn from_records<'a, I>(records: I) -> TransformResult<Self>
    where
        I: IntoIterator<Item = &'a TransformRecord>,
    {
        let transforms = records
            .into_iter()
            .map(build)
            .collect::<TransformResult<Vec<_>>>()?;
        Ok(Self { transforms })
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Run the image through every transform in order.
    pub fn run(&self, image: ImageBuffer) -> ImageBuffer {
        run(image, &self.transforms)
    }
}

impl FromIterator<Transform> for Pipeline {
    fn from_iter<T: IntoIterator<Item = Transform>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Apply `transforms` in order, each to the output of the previous one.
///
/// An empty list returns the input unchanged.
pub fn run(image: ImageBuffer, transforms: &[Transform]) -> ImageBuffer {
    let mut current = image;
    for (index, transform) in transforms.iter().enumerate() {
        debug!(
            "step {}/{}: {} on {}x{} {:?}",
            index + 1,
            transforms.len(),
            transform.name(),
            current.width(),
            current.height(),
            current.mode()
        );
        current = transform.apply(current);
    }
    current
}

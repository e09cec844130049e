//! In-memory image buffer with normalized floating-point samples.
//!
//! Samples are stored row-major and interleaved, `f32` in `[0.0, 1.0]` after
//! decoding. The channel layout is part of the buffer value: a grayscale
//! buffer has exactly one sample per pixel and an RGB buffer has three, so the
//! grayscale flag and the actual channel depth can never disagree.

/// Lowest valid sample value after processing.
pub const PIXEL_MIN: f32 = 0.0;

/// Highest valid sample value after processing.
pub const PIXEL_MAX: f32 = 1.0;

/// Channel layout of an [`ImageBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Single luminance channel.
    Gray,
    /// Three interleaved channels, red, green, blue.
    #[default]
    Rgb,
}

impl ColorMode {
    /// Number of samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Gray => 1,
            ColorMode::Rgb => 3,
        }
    }

    #[inline]
    pub fn is_grayscale(self) -> bool {
        self == ColorMode::Gray
    }
}

/// An image as a grid of normalized samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    mode: ColorMode,
    data: Vec<f32>,
}

impl ImageBuffer {
    /// Create a buffer from raw samples.
    ///
    /// Returns `None` when `data.len()` is not `width * height * channels`.
    pub fn new(width: usize, height: usize, mode: ColorMode, data: Vec<f32>) -> Option<Self> {
        if data.len() != width * height * mode.channels() {
            return None;
        }
        Some(Self {
            width,
            height,
            mode,
            data,
        })
    }

    /// Create a buffer where every sample has the same value.
    pub fn filled(width: usize, height: usize, mode: ColorMode, value: f32) -> Self {
        Self {
            width,
            height,
            mode,
            data: vec![value; width * height * mode.channels()],
        }
    }

    /// Create an RGB buffer from 8-bit interleaved pixels (3 bytes per pixel).
    pub fn from_rgb8(width: usize, height: usize, pixels: &[u8]) -> Option<Self> {
        Self::new(width, height, ColorMode::Rgb, normalize_u8(pixels))
    }

    /// Create a grayscale buffer from 8-bit pixels (1 byte per pixel).
    pub fn from_luma8(width: usize, height: usize, pixels: &[u8]) -> Option<Self> {
        Self::new(width, height, ColorMode::Gray, normalize_u8(pixels))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.mode.channels()
    }

    #[inline]
    pub fn is_grayscale(&self) -> bool {
        self.mode.is_grayscale()
    }

    /// `(height, width, channels)`, the array shape of the buffer.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels())
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Sample at row `y`, column `x`, channel `c`.
    #[inline]
    pub fn get(&self, y: usize, x: usize, c: usize) -> f32 {
        self.data[(y * self.width + x) * self.channels() + c]
    }

    /// Build a new buffer of the same shape and layout with different samples.
    ///
    /// Panics if the sample count does not match, which would break the
    /// shape-preservation contract every transform relies on.
    pub(crate) fn with_samples(&self, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), self.data.len(), "sample count mismatch");
        Self {
            width: self.width,
            height: self.height,
            mode: self.mode,
            data,
        }
    }

    /// Wrap a single-channel plane computed from a buffer of the same size.
    pub(crate) fn gray_from_plane(width: usize, height: usize, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), width * height, "plane size mismatch");
        Self {
            width,
            height,
            mode: ColorMode::Gray,
            data,
        }
    }

    /// Apply `f` to every sample, keeping shape and layout.
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        let mut data = self.data;
        for s in &mut data {
            *s = f(*s);
        }
        Self { data, ..self }
    }

    /// Clamp every sample to `[PIXEL_MIN, PIXEL_MAX]`.
    pub fn clamped(self) -> Self {
        self.map(|s| s.clamp(PIXEL_MIN, PIXEL_MAX))
    }

    /// Largest sample value, or `0.0` for an empty buffer.
    pub fn max_sample(&self) -> f32 {
        self.data.iter().copied().fold(0.0_f32, f32::max)
    }

    /// Check if this is an empty image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn normalize_u8(pixels: &[u8]) -> Vec<f32> {
    pixels.iter().map(|&p| p as f32 / 255.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(ImageBuffer::new(2, 2, ColorMode::Rgb, vec![0.0; 4]).is_none());
        assert!(ImageBuffer::new(2, 2, ColorMode::Gray, vec![0.0; 4]).is_some());
    }

    #[test]
    fn test_shape() {
        let buf = ImageBuffer::filled(5, 3, ColorMode::Rgb, 0.5);
        assert_eq!(buf.shape(), (3, 5, 3));
        assert_eq!(buf.samples().len(), 45);
        assert!(!buf.is_grayscale());
    }

    #[test]
    fn test_from_rgb8_normalizes() {
        let buf = ImageBuffer::from_rgb8(1, 1, &[0, 255, 51]).unwrap();
        assert_eq!(buf.get(0, 0, 0), 0.0);
        assert_eq!(buf.get(0, 0, 1), 1.0);
        assert!((buf.get(0, 0, 2) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_from_luma8_is_grayscale() {
        let buf = ImageBuffer::from_luma8(2, 1, &[0, 255]).unwrap();
        assert!(buf.is_grayscale());
        assert_eq!(buf.channels(), 1);
    }

    #[test]
    fn test_clamped() {
        let buf = ImageBuffer::new(3, 1, ColorMode::Gray, vec![-0.5, 0.5, 1.5])
            .unwrap()
            .clamped();
        assert_eq!(buf.samples(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_max_sample() {
        let buf = ImageBuffer::new(3, 1, ColorMode::Gray, vec![0.1, 0.7, 0.3]).unwrap();
        assert_eq!(buf.max_sample(), 0.7);
        assert_eq!(ImageBuffer::filled(0, 0, ColorMode::Gray, 1.0).max_sample(), 0.0);
    }

    #[test]
    fn test_empty() {
        assert!(ImageBuffer::filled(0, 10, ColorMode::Rgb, 0.0).is_empty());
        assert!(!ImageBuffer::filled(1, 1, ColorMode::Rgb, 0.0).is_empty());
    }
}

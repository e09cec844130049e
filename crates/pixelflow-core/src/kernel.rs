//! Convolution kernels and the reflect-padded convolution engine.
//!
//! ## Border Handling
//!
//! Borders are extended with **reflect** padding: the sample at index `-1`
//! is the sample at index `1`, the edge sample itself is not repeated. When
//! the kernel is larger than the image the reflection bounces back and forth,
//! so any kernel size is valid for any image size.
//!
//! ## Numerics
//!
//! The engine is range-agnostic. Weights are applied as a correlation (the
//! kernel is not flipped), sums accumulate in `f32`, and nothing is clamped.
//! Callers that need `[0, 1]` output clamp or normalize afterwards.
//!
//! With the `parallel` feature, output rows are computed on the rayon pool.
//! Every row is computed exactly as in the sequential path, so results are
//! identical.

use crate::buffer::ImageBuffer;
use log::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sobel derivative kernel along x.
pub const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Sobel derivative kernel along y.
pub const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// An immutable `height x width` matrix of weights with odd dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Vec<f32>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// Returns `None` if either dimension is even or zero, or if the weight
    /// count does not match.
    pub fn new(weights: Vec<f32>, width: usize, height: usize) -> Option<Self> {
        if width % 2 == 0 || height % 2 == 0 || weights.len() != width * height {
            return None;
        }
        Some(Self {
            weights,
            width,
            height,
        })
    }

    /// Create a kernel from a fixed-size matrix such as [`SOBEL_X`].
    ///
    /// Panics if either dimension is even.
    pub fn from_rows<const W: usize, const H: usize>(rows: [[f32; W]; H]) -> Self {
        assert!(W % 2 == 1 && H % 2 == 1, "kernel dimensions must be odd");
        Self {
            weights: rows.iter().flat_map(|row| row.iter().copied()).collect(),
            width: W,
            height: H,
        }
    }

    /// Normalized all-ones kernel (weights sum to 1).
    ///
    /// Even sizes are promoted to the next odd size so a center exists.
    pub fn normalized_box(width: usize, height: usize) -> Self {
        let width = odd_size(width.max(1));
        let height = odd_size(height.max(1));
        let count = width * height;
        Self {
            weights: vec![1.0 / count as f32; count],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(pad_h, pad_w)`: rows and columns of padding needed on each side.
    #[inline]
    pub fn padding(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }
}

/// Round an even size up to the next odd size; odd sizes pass through.
#[inline]
pub fn odd_size(size: usize) -> usize {
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

/// Map a possibly out-of-range index into `0..len` by reflection about the
/// first and last samples.
///
/// `len` must be non-zero. A single-sample axis maps everything to `0`.
#[inline]
pub fn reflect_index(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let i = index.rem_euclid(period);
    if i < len as isize {
        i as usize
    } else {
        (period - i) as usize
    }
}

/// Convolve a buffer with a kernel, honoring its channel layout.
///
/// RGB buffers are convolved per channel with the same weights; grayscale
/// buffers take the single-channel path. The output has the same shape and
/// layout as the input.
pub fn convolve(buffer: &ImageBuffer, kernel: &Kernel) -> ImageBuffer {
    let data = if buffer.is_grayscale() {
        convolve_plane(buffer.samples(), buffer.width(), buffer.height(), kernel)
    } else {
        convolve_interleaved(
            buffer.samples(),
            buffer.width(),
            buffer.height(),
            buffer.channels(),
            kernel,
        )
    };
    buffer.with_samples(data)
}

/// Convolve a single-channel plane of `width * height` samples.
pub fn convolve_plane(samples: &[f32], width: usize, height: usize, kernel: &Kernel) -> Vec<f32> {
    convolve_interleaved(samples, width, height, 1, kernel)
}

fn convolve_interleaved(
    samples: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel,
) -> Vec<f32> {
    trace!(
        "convolve {}x{}x{} with {}x{} kernel",
        height,
        width,
        channels,
        kernel.height,
        kernel.width
    );
    debug_assert_eq!(samples.len(), width * height * channels);

    let row_len = width * channels;
    let mut dst = vec![0.0_f32; samples.len()];
    if row_len == 0 || height == 0 {
        return dst;
    }

    // Source row/column for every row/column of the virtual padded image.
    let (pad_h, pad_w) = kernel.padding();
    let rows: Vec<usize> = (0..height + 2 * pad_h)
        .map(|p| reflect_index(p as isize - pad_h as isize, height))
        .collect();
    let cols: Vec<usize> = (0..width + 2 * pad_w)
        .map(|p| reflect_index(p as isize - pad_w as isize, width))
        .collect();

    // Each kernel row is summed on its own before being added to the total,
    // so antisymmetric kernels (Sobel) cancel exactly on flat regions.
    let fill_row = |y: usize, out: &mut [f32]| {
        let mut sums = [0.0_f32; 3];
        let mut row_sums = [0.0_f32; 3];
        for x in 0..width {
            sums[..channels].fill(0.0);
            for ky in 0..kernel.height {
                let src_row = &samples[rows[y + ky] * row_len..][..row_len];
                let k_row = &kernel.weights[ky * kernel.width..][..kernel.width];
                row_sums[..channels].fill(0.0);
                for (kx, &w) in k_row.iter().enumerate() {
                    let base = cols[x + kx] * channels;
                    for c in 0..channels {
                        row_sums[c] += src_row[base + c] * w;
                    }
                }
                for c in 0..channels {
                    sums[c] += row_sums[c];
                }
            }
            out[x * channels..(x + 1) * channels].copy_from_slice(&sums[..channels]);
        }
    };

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, out)| fill_row(y, out));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, out)| fill_row(y, out));

    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;

    fn weight_sum(k: &Kernel) -> f32 {
        k.weights.iter().sum()
    }

    fn approx_eq(a: &[f32], b: &[f32], tol: f32) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tol)
    }

    #[test]
    fn test_reflect_index_matches_mirror_padding() {
        // len 4: ... 2 1 | 0 1 2 3 | 2 1 ...
        assert_eq!(reflect_index(-1, 4), 1);
        assert_eq!(reflect_index(-2, 4), 2);
        assert_eq!(reflect_index(0, 4), 0);
        assert_eq!(reflect_index(3, 4), 3);
        assert_eq!(reflect_index(4, 4), 2);
        assert_eq!(reflect_index(5, 4), 1);
    }

    #[test]
    fn test_reflect_index_bounces_past_extent() {
        // len 3, period 4: index -4 wraps back to 0, 6 -> 2
        assert_eq!(reflect_index(-3, 3), 1);
        assert_eq!(reflect_index(-4, 3), 0);
        assert_eq!(reflect_index(6, 3), 2);
        assert_eq!(reflect_index(7, 3), 1);
    }

    #[test]
    fn test_reflect_index_single_sample() {
        assert_eq!(reflect_index(-5, 1), 0);
        assert_eq!(reflect_index(9, 1), 0);
    }

    #[test]
    fn test_kernel_new_rejects_even() {
        assert!(Kernel::new(vec![0.0; 4], 2, 2).is_none());
        assert!(Kernel::new(vec![0.0; 8], 3, 3).is_none());
        assert!(Kernel::new(vec![0.0; 3], 3, 1).is_some());
    }

    #[test]
    fn test_normalized_box_promotes_even_sizes() {
        let k = Kernel::normalized_box(4, 6);
        assert_eq!(k.width(), 5);
        assert_eq!(k.height(), 7);
        assert_eq!(k.padding(), (3, 2));
        assert!((weight_sum(&k) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sobel_kernels_sum_to_zero() {
        assert_eq!(weight_sum(&Kernel::from_rows(SOBEL_X)), 0.0);
        assert_eq!(weight_sum(&Kernel::from_rows(SOBEL_Y)), 0.0);
    }

    #[test]
    fn test_identity_kernel() {
        let k = Kernel::new(vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0], 3, 3).unwrap();
        let samples: Vec<f32> = (0..12).map(|i| i as f32 / 12.0).collect();
        let buf = ImageBuffer::new(2, 2, ColorMode::Rgb, samples.clone()).unwrap();
        assert_eq!(convolve(&buf, &k).samples(), samples.as_slice());
    }

    #[test]
    fn test_single_white_pixel_box_3x3() {
        let mut samples = vec![0.0; 9];
        samples[4] = 1.0;
        let out = convolve_plane(&samples, 3, 3, &Kernel::normalized_box(3, 3));
        let (c, e, m) = (4.0 / 9.0, 2.0 / 9.0, 1.0 / 9.0);
        let expected = [c, e, c, e, m, e, c, e, c];
        assert!(approx_eq(&out, &expected, 1e-6), "got {:?}", out);
    }

    #[test]
    fn test_horizontal_kernel_reflects_columns() {
        // [1, 0, 0] along x: output[x] = input[x - 1], reflected at x = 0
        let k = Kernel::new(vec![1.0, 0.0, 0.0], 3, 1).unwrap();
        let out = convolve_plane(&[0.1, 0.2, 0.3, 0.4], 4, 1, &k);
        assert!(approx_eq(&out, &[0.2, 0.1, 0.2, 0.3], 1e-7));
    }

    #[test]
    fn test_rgb_channels_are_independent() {
        // Left pixel red, right pixel blue
        let samples = vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let buf = ImageBuffer::new(2, 1, ColorMode::Rgb, samples).unwrap();
        let out = convolve(&buf, &Kernel::normalized_box(3, 1));
        // Row reflected: [B, R, B] around x = 0 and [R, B, R] around x = 1
        let third = 1.0 / 3.0;
        let expected = [third, 0.0, 2.0 * third, 2.0 * third, 0.0, third];
        assert!(approx_eq(out.samples(), &expected, 1e-6), "got {:?}", out.samples());
        assert_eq!(out.mode(), ColorMode::Rgb);
    }

    #[test]
    fn test_kernel_larger_than_image() {
        let buf = ImageBuffer::filled(2, 2, ColorMode::Gray, 0.25);
        let out = convolve(&buf, &Kernel::normalized_box(9, 9));
        assert!(approx_eq(out.samples(), &[0.25; 4], 1e-6));
    }

    #[test]
    fn test_engine_does_not_clamp() {
        let k = Kernel::new(vec![2.0], 1, 1).unwrap();
        let out = convolve_plane(&[0.75, -0.5], 2, 1, &k);
        assert_eq!(out, vec![1.5, -1.0]);
    }

    #[test]
    fn test_empty_buffer() {
        let buf = ImageBuffer::filled(0, 0, ColorMode::Rgb, 0.0);
        assert!(convolve(&buf, &Kernel::normalized_box(3, 3)).is_empty());
    }
}

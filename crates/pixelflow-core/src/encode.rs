//! Image encoding from normalized buffers.
//!
//! Samples are clamped to `[0, 1]`, scaled by 255 and truncated to `u8`.
//! Single-channel buffers are written as 8-bit grayscale, three-channel
//! buffers as RGB8.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use log::debug;
use thiserror::Error;

use crate::buffer::{ColorMode, ImageBuffer, PIXEL_MAX, PIXEL_MIN};

/// Errors that can occur while writing an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// No output path was given
    #[error("Output path is empty")]
    EmptyPath,

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: usize, height: usize },

    /// The output directory could not be created
    #[error("Failed to create directory {path}: {message}")]
    CreateDir { path: String, message: String },

    /// Encoding or writing failed
    #[error("Failed to save image: {0}")]
    EncodingFailed(String),
}

/// Quantize samples to bytes: clamp, scale by 255, truncate.
pub fn to_bytes(buffer: &ImageBuffer) -> Vec<u8> {
    buffer
        .samples()
        .iter()
        .map(|s| (s.clamp(PIXEL_MIN, PIXEL_MAX) * 255.0) as u8)
        .collect()
}

/// Convert a buffer into an `image` crate image.
pub fn to_dynamic(buffer: &ImageBuffer) -> Result<DynamicImage, EncodeError> {
    let (width, height) = (buffer.width(), buffer.height());
    if buffer.is_empty() {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let bytes = to_bytes(buffer);
    let (w, h) = (width as u32, height as u32);
    let img = match buffer.mode() {
        ColorMode::Gray => GrayImage::from_raw(w, h, bytes).map(DynamicImage::ImageLuma8),
        ColorMode::Rgb => RgbImage::from_raw(w, h, bytes).map(DynamicImage::ImageRgb8),
    };
    img.ok_or(EncodeError::InvalidDimensions { width, height })
}

/// Write a buffer to `path`, creating parent directories as needed.
///
/// The format follows the file extension.
pub fn save(path: &Path, buffer: &ImageBuffer) -> Result<(), EncodeError> {
    if path.as_os_str().is_empty() {
        return Err(EncodeError::EmptyPath);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| EncodeError::CreateDir {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }
    let format =
        ImageFormat::from_path(path).map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    to_dynamic(buffer)?
        .save_with_format(path, format)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    debug!("wrote {} ({:?})", path.display(), buffer.mode());
    Ok(())
}

/// Encode a buffer as PNG bytes.
pub fn encode_png(buffer: &ImageBuffer) -> Result<Vec<u8>, EncodeError> {
    let mut out = Cursor::new(Vec::new());
    to_dynamic(buffer)?
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;

    #[test]
    fn test_to_bytes_clamps_and_truncates() {
        let buf = ImageBuffer::new(4, 1, ColorMode::Gray, vec![-0.2, 0.5, 0.999, 1.7]).unwrap();
        assert_eq!(to_bytes(&buf), vec![0, 127, 254, 255]);
    }

    #[test]
    fn test_encode_png_magic_bytes() {
        let buf = ImageBuffer::filled(4, 4, ColorMode::Rgb, 0.5);
        let png = encode_png(&buf).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_empty_image_rejected() {
        let buf = ImageBuffer::filled(0, 3, ColorMode::Rgb, 0.5);
        assert!(matches!(
            encode_png(&buf),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_save_creates_parent_dirs_and_keeps_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/edges.png");
        let buf = ImageBuffer::new(2, 1, ColorMode::Gray, vec![0.0, 1.0]).unwrap();
        save(&path, &buf).unwrap();

        let back = decode::load(&path).unwrap();
        assert!(back.is_grayscale());
        assert_eq!(back.samples(), &[0.0, 1.0]);
    }

    #[test]
    fn test_save_jpeg_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        save(&path, &ImageBuffer::filled(8, 8, ColorMode::Rgb, 0.5)).unwrap();
        let back = decode::load(&path).unwrap();
        assert_eq!(back.shape(), (8, 8, 3));
    }

    #[test]
    fn test_save_empty_path() {
        let buf = ImageBuffer::filled(1, 1, ColorMode::Rgb, 0.5);
        assert!(matches!(
            save(Path::new(""), &buf),
            Err(EncodeError::EmptyPath)
        ));
    }

    #[test]
    fn test_save_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let buf = ImageBuffer::filled(1, 1, ColorMode::Rgb, 0.5);
        assert!(matches!(
            save(&dir.path().join("out.xyz"), &buf),
            Err(EncodeError::EncodingFailed(_))
        ));
    }
}

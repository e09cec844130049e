//! Image decoding into normalized buffers.
//!
//! Grayscale sources become single-channel buffers and everything else
//! becomes RGB. Alpha is dropped; samples are `u8 / 255`.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageReader};
use log::debug;
use thiserror::Error;

use crate::buffer::ImageBuffer;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format: {0}")]
    InvalidFormat(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Decode an image file from disk.
pub fn load(path: &Path) -> Result<ImageBuffer, DecodeError> {
    let reader = ImageReader::open(path)
        .map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| DecodeError::IoError(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat(path.display().to_string()));
    }
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    debug!("decoded {} ({:?})", path.display(), img.color());
    from_dynamic(img)
}

/// Decode an in-memory image (PNG or JPEG).
pub fn decode_bytes(bytes: &[u8]) -> Result<ImageBuffer, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::IoError(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat("unrecognized image bytes".to_string()));
    }
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    from_dynamic(img)
}

/// Convert a decoded `image` crate image into a buffer.
pub fn from_dynamic(img: DynamicImage) -> Result<ImageBuffer, DecodeError> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let buffer = if img.color().has_color() {
        ImageBuffer::from_rgb8(width, height, img.into_rgb8().as_raw())
    } else {
        ImageBuffer::from_luma8(width, height, img.into_luma8().as_raw())
    };
    buffer.ok_or_else(|| {
        DecodeError::CorruptedFile(format!("pixel data does not match {}x{}", width, height))
    })
}

//! JPEG encoding for the warped output.
//!
//! Planes are written as single-channel (grayscale) baseline JPEG using the
//! `image` crate's encoder.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;
use tracing::debug;

use crate::plane::Plane;

/// Default JPEG quality, matching common library defaults for `imwrite`.
pub const DEFAULT_QUALITY: u8 = 95;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// The output file could not be written
    #[error("Failed to write {path}: {message}")]
    Io { path: String, message: String },
}

/// Encode a plane to grayscale JPEG bytes.
///
/// # Arguments
///
/// * `plane` - Samples to encode (1 byte per pixel, row-major order)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_plane_jpeg(plane: &Plane, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = plane.dimensions();

    // Validate dimensions
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    // Validate pixel data length
    let expected_len = (width as usize) * (height as usize);
    if plane.data.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: plane.data.len(),
        });
    }

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(&plane.data, width, height, ExtendedColorType::L8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a plane as JPEG and write it to `path`.
///
/// The image is fully encoded before the file is created, so an encoding
/// failure never leaves a partial file behind.
pub fn write_jpeg(plane: &Plane, path: impl AsRef<Path>, quality: u8) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let bytes = encode_plane_jpeg(plane, quality)?;

    std::fs::write(path, &bytes).map_err(|e| EncodeError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote jpeg");
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

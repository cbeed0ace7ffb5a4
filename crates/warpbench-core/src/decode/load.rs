//! Image loading into interleaved BGR buffers.

use std::io::Cursor;
use std::path::Path;

use image::{ImageError, ImageReader};
use tracing::debug;

use super::{BgrImage, DecodeError};

/// Load an image file from disk as 8-bit BGR.
///
/// The format is detected from the file contents, not the extension. Alpha
/// channels are dropped and grayscale images are expanded to three channels.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be opened or read,
/// `DecodeError::InvalidFormat` if the format is not recognized, and
/// `DecodeError::CorruptedFile` if decoding fails.
pub fn load_bgr(path: impl AsRef<Path>) -> Result<BgrImage, DecodeError> {
    let path = path.as_ref();
    let reader = ImageReader::open(path)
        .map_err(|e| DecodeError::Io(format!("{}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| DecodeError::Io(format!("{}: {}", path.display(), e)))?;

    debug!(path = %path.display(), format = ?reader.format(), "decoding image");

    let img = reader.decode().map_err(map_image_error)?;
    Ok(BgrImage::from_rgb_image(img.into_rgb8()))
}

/// Decode an in-memory encoded image as 8-bit BGR.
pub fn load_bgr_from_bytes(bytes: &[u8]) -> Result<BgrImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Io(e.to_string()))?;

    let img = reader.decode().map_err(map_image_error)?;
    Ok(BgrImage::from_rgb_image(img.into_rgb8()))
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        ImageError::IoError(e) => DecodeError::Io(e.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

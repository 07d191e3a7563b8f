//! Pure Rust image backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format detection | `ImageReader::with_guessed_format` (magic bytes, then extension) |
//! | Identify | `ImageReader::into_dimensions` (header only) |
//! | Decode | `ImageReader::decode` |
//! | Encode | `DynamicImage::write_to` |
//!
//! Only the PNG, JPEG and GIF codecs are compiled in, matching the set of
//! extensions the scanner accepts.

use super::backend::{Dimensions, Encoded, ImageBackend, ImageError};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// Format used when the source format is unknown or cannot be written.
pub const FALLBACK_FORMAT: ImageFormat = ImageFormat::Png;

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, ImageError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

/// Pick the output format for a detected source format.
pub fn output_format(detected: Option<ImageFormat>) -> ImageFormat {
    detected
        .filter(|f| f.writing_enabled())
        .unwrap_or(FALLBACK_FORMAT)
}

/// Convert to a pixel layout the target encoder accepts.
///
/// JPEG has no alpha channel; GIF frames are RGBA.
fn prepare_for(img: DynamicImage, format: ImageFormat) -> DynamicImage {
    match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        ImageFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => img,
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, ImageError> {
        let (width, height) = open(path)?.into_dimensions().map_err(|e| {
            ImageError::Decode(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn reencode(&self, path: &Path) -> Result<Encoded, ImageError> {
        let reader = open(path)?;
        let format = output_format(reader.format());
        let img = reader.decode().map_err(|e| {
            ImageError::Decode(format!("Failed to decode {}: {}", path.display(), e))
        })?;

        let mut bytes = Vec::new();
        prepare_for(img, format)
            .write_to(&mut Cursor::new(&mut bytes), format)
            .map_err(|e| {
                ImageError::Encode(format!("Failed to encode {}: {}", path.display(), e))
            })?;
        Ok(Encoded { format, bytes })
    }
}

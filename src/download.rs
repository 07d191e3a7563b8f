//! Image downloads: re-encoded bytes under a flattened file name.
//!
//! A download reads one catalog image, re-encodes it in its detected format
//! (PNG when the format is unknown) and names it after its relative path with
//! separators turned into underscores:
//!
//! ```text
//! pbmc3k/leiden/umap.png  →  pbmc3k_leiden_umap.png  (image/png)
//! ```
//!
//! Only separators change, so distinct catalog paths map to distinct names as
//! long as no directory or file name itself contains `_` in a way that could
//! mirror a separator.

use crate::imaging::{ImageBackend, ImageError};
use crate::paths::ImagePath;
use crate::scan::Catalog;
use image::ImageFormat;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An image ready to be written or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Catalog entry the bytes came from.
    pub image: ImagePath,
    /// Suggested file name (`/` replaced by `_`).
    pub file_name: String,
    pub format: ImageFormat,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Read and re-encode `image` from `catalog`.
pub fn prepare_download(
    backend: &impl ImageBackend,
    catalog: &Catalog,
    image: &ImagePath,
) -> Result<Download, ImageError> {
    let encoded = backend.reencode(&catalog.resolve(image))?;
    Ok(Download {
        image: image.clone(),
        file_name: image.download_name(),
        format: encoded.format,
        mime: encoded.mime(),
        bytes: encoded.bytes,
    })
}

/// Write a download into `dir` under its file name. Returns the written path.
pub fn save_download(download: &Download, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&download.file_name);
    fs::write(&path, &download.bytes)?;
    Ok(path)
}

/// Outcome of exporting one image of a batch.
#[derive(Debug)]
pub struct ExportResult {
    pub image: ImagePath,
    pub outcome: Result<PathBuf, ImageError>,
}

/// Export every image in `images` to `dir`.
///
/// Failures are per item: a broken file is reported in its result and the
/// remaining images are still exported.
pub fn export_all(
    backend: &impl ImageBackend,
    catalog: &Catalog,
    images: &[ImagePath],
    dir: &Path,
) -> Vec<ExportResult> {
    images
        .iter()
        .map(|image| ExportResult {
            image: image.clone(),
            outcome: prepare_download(backend, catalog, image)
                .and_then(|d| save_download(&d, dir).map_err(ImageError::from)),
        })
        .collect()
}

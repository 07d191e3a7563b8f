//! Shared test utilities for the plot-atlas test suite.
//!
//! Provides fixture builders (fake image trees, real encoded images) and
//! extractors that turn catalogs and filter results into plain strings for
//! readable assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = fake_tree(&["A/B/x.png", "A/C/y.jpg"]);
//! let catalog = scan(tmp.path()).unwrap();
//! assert_eq!(catalog_strings(&catalog), vec!["A/B/x.png", "A/C/y.jpg"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::paths::ImagePath;
use crate::scan::Catalog;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory containing placeholder files at `paths`.
///
/// Parent directories are created as needed. File contents are not valid
/// images; the scanner only looks at names.
pub fn fake_tree(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for rel in paths {
        let full = tmp.path().join(rel);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full, "fake image").unwrap();
    }
    tmp
}

/// Write a small, decodable RGB image. Format follows the file extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 40) as u8, (y * 40) as u8, 128])
    });
    img.save(path).unwrap();
}

/// In-memory catalog rooted at `/catalog`, no filesystem involved.
pub fn catalog_of(paths: &[&str]) -> Catalog {
    Catalog::new("/catalog", image_paths(paths))
}

pub fn image_paths(paths: &[&str]) -> Vec<ImagePath> {
    paths.iter().map(|p| ImagePath::new(*p)).collect()
}

// =========================================================================
// Extractors
// =========================================================================

/// All catalog entries as strings, in catalog order.
pub fn catalog_strings(catalog: &Catalog) -> Vec<&str> {
    catalog.images().iter().map(|p| p.as_str()).collect()
}

/// Any list of image paths as strings, preserving order.
pub fn strings(images: &[ImagePath]) -> Vec<&str> {
    images.iter().map(|p| p.as_str()).collect()
}

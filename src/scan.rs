//! Filesystem scanning and catalog construction.
//!
//! Walks a root directory once and produces a [`Catalog`]: the flat, sorted
//! list of every supported image below it, addressed by root-relative path.
//! Everything downstream (facets, filtering, pagination) works on that list
//! and never touches the filesystem again.
//!
//! ## Directory Structure
//!
//! Any nesting depth is accepted. The first four segments of a path become
//! filter levels; deeper directories still take part in search.
//!
//! ```text
//! images/                              # Catalog root
//! ├── pbmc3k/                          # level 1
//! │   ├── leiden/                      # level 2
//! │   │   ├── umap_leiden.png
//! │   │   └── umap_leiden_r1.PNG       # extension match is case-insensitive
//! │   └── louvain/
//! │       └── umap_louvain.jpg
//! └── tabula/
//!     └── lung/
//!         ├── notes.txt                # ignored
//!         └── umap.gif
//! ```
//!
//! ## Ordering
//!
//! The catalog is sorted by the `/`-joined relative path. That order is the
//! canonical one: filtering preserves it and pagination slices it.
//!
//! ## Skipped Entries
//!
//! - Files whose extension is not in [`IMAGE_EXTENSIONS`]
//! - Entries the walker cannot read (permission errors)
//! - Symlinked directories: they are not descended into, so a linked
//!   directory adds no entries. A symlink to a file is listed like the file.
//! - Paths that are not valid UTF-8

use crate::paths::ImagePath;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Image root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),
}

/// Extensions (lowercase, no dot) that make a file part of the catalog.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Every supported image under a root, sorted by relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    root: PathBuf,
    images: Vec<ImagePath>,
}

impl Catalog {
    /// Build a catalog from already-known relative paths.
    ///
    /// Paths are sorted and deduplicated so the catalog invariants hold
    /// regardless of input order.
    pub fn new(root: impl Into<PathBuf>, mut images: Vec<ImagePath>) -> Self {
        images.sort();
        images.dedup();
        Self {
            root: root.into(),
            images,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn images(&self) -> &[ImagePath] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn contains(&self, image: &ImagePath) -> bool {
        self.images.binary_search(image).is_ok()
    }

    /// Absolute (root-joined) filesystem location of a catalog entry.
    pub fn resolve(&self, image: &ImagePath) -> PathBuf {
        image
            .as_str()
            .split(crate::paths::SEPARATOR)
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

/// Scan `root` recursively and return its catalog.
///
/// Fails with [`ScanError::RootNotFound`] when `root` is missing or is not a
/// directory. No partial catalog is ever returned.
pub fn scan(root: &Path) -> Result<Catalog, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let images = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| is_file_entry(e) && is_image(e.path()))
        .filter_map(|e| {
            let rel = e.path().strip_prefix(root).ok()?;
            ImagePath::from_relative(rel)
        })
        .collect();

    Ok(Catalog::new(root, images))
}

/// Regular files, and symlinks that point at one. Linked directories are
/// never descended into.
fn is_file_entry(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Whether a file name carries one of the supported image extensions.
pub fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

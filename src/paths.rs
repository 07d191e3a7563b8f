//! Relative image paths and the helpers that take them apart.
//!
//! Every image in a catalog is addressed by its path relative to the catalog
//! root. Segments are always joined with `/`, whatever the host platform uses,
//! so filtering, sorting and download names behave the same everywhere.
//!
//! ## Derived Names
//!
//! ```text
//! path:          pbmc/leiden/umap_leiden.png
//! segments(_, 2) ["pbmc", "leiden"]
//! file name:     umap_leiden.png
//! caption:       pbmc / leiden / umap_leiden.png
//! download name: pbmc_leiden_umap_leiden.png
//! ```

use serde::Serialize;
use std::fmt;
use std::path::{Component, Path};

/// Separator used between segments of an [`ImagePath`].
pub const SEPARATOR: char = '/';

/// Split a relative path into its components, keeping at most `max_levels`.
///
/// No `.`/`..` normalization happens; the input is expected to be a
/// well-formed relative path such as the scanner produces.
pub fn segments(path: &str, max_levels: usize) -> Vec<&str> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split(SEPARATOR).take(max_levels).collect()
}

/// The last segment of a relative path (its base file name).
pub fn file_name(path: &str) -> &str {
    path.rsplit(SEPARATOR).next().unwrap_or(path)
}

/// Display caption: segments joined with ` / `.
pub fn caption(path: &str) -> String {
    path.split(SEPARATOR).collect::<Vec<_>>().join(" / ")
}

/// File name offered for a download: every separator becomes `_`.
pub fn download_name(path: &str) -> String {
    path.replace(SEPARATOR, "_")
}

/// A file location relative to the catalog root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ImagePath(String);

impl ImagePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Build from a root-relative filesystem path.
    ///
    /// Returns `None` when a component is not valid UTF-8 or the path is not
    /// a plain relative path (root, prefix or `..` components).
    pub fn from_relative(path: &Path) -> Option<Self> {
        let mut parts = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str()?),
                Component::CurDir => {}
                _ => return None,
            }
        }
        if parts.is_empty() {
            return None;
        }
        Some(Self(parts.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self, max_levels: usize) -> Vec<&str> {
        segments(&self.0, max_levels)
    }

    /// Segment at `level` (0-based), if the path is that deep.
    pub fn segment(&self, level: usize) -> Option<&str> {
        self.segments(level + 1).get(level).copied()
    }

    pub fn file_name(&self) -> &str {
        file_name(&self.0)
    }

    /// Lowercased extension of the file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        Path::new(self.file_name())
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    pub fn caption(&self) -> String {
        caption(&self.0)
    }

    pub fn download_name(&self) -> String {
        download_name(&self.0)
    }
}

impl fmt::Display for ImagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ImagePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImagePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn segments_splits_on_separator() {
        assert_eq!(segments("A/B/x.png", 4), vec!["A", "B", "x.png"]);
    }

    #[test]
    fn segments_truncates_to_max_levels() {
        assert_eq!(segments("a/b/c/d/e/f.png", 4), vec!["a", "b", "c", "d"]);
        assert_eq!(segments("a/b/c.png", 1), vec!["a"]);
    }

    #[test]
    fn segments_of_empty_path_is_empty() {
        assert!(segments("", 4).is_empty());
    }

    #[test]
    fn segments_zero_levels_is_empty() {
        assert!(segments("a/b.png", 0).is_empty());
    }

    #[test]
    fn segments_keeps_dot_components() {
        assert_eq!(segments("./a/../b.png", 4), vec![".", "a", "..", "b.png"]);
    }

    #[test]
    fn file_name_of_nested_and_flat_paths() {
        assert_eq!(file_name("A/B/x.png"), "x.png");
        assert_eq!(file_name("x.png"), "x.png");
    }

    #[test]
    fn caption_uses_spaced_slashes() {
        assert_eq!(caption("A/B/x.png"), "A / B / x.png");
        assert_eq!(caption("x.png"), "x.png");
    }

    #[test]
    fn download_name_replaces_separators() {
        assert_eq!(download_name("A/B/x.png"), "A_B_x.png");
    }

    #[test]
    fn download_name_preserves_other_characters() {
        assert_eq!(download_name("a b/c-d/e_f.PNG"), "a b_c-d_e_f.PNG");
    }

    #[test]
    fn image_path_segment_at_level() {
        let p = ImagePath::new("A/B/x.png");
        assert_eq!(p.segment(0), Some("A"));
        assert_eq!(p.segment(2), Some("x.png"));
        assert_eq!(p.segment(3), None);
    }

    #[test]
    fn image_path_extension_is_lowercased() {
        assert_eq!(ImagePath::new("a/B.JPeG").extension().as_deref(), Some("jpeg"));
        assert_eq!(ImagePath::new("a/README").extension(), None);
    }

    #[test]
    fn from_relative_joins_with_forward_slash() {
        let rel: PathBuf = ["A", "B", "x.png"].iter().collect();
        assert_eq!(
            ImagePath::from_relative(&rel),
            Some(ImagePath::new("A/B/x.png"))
        );
    }

    #[test]
    fn from_relative_drops_leading_cur_dir() {
        let rel = PathBuf::from("./A/x.png");
        assert_eq!(ImagePath::from_relative(&rel), Some(ImagePath::new("A/x.png")));
    }

    #[test]
    fn from_relative_rejects_parent_dir() {
        assert_eq!(ImagePath::from_relative(Path::new("../x.png")), None);
    }

    #[test]
    fn from_relative_rejects_empty() {
        assert_eq!(ImagePath::from_relative(Path::new("")), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&ImagePath::new("A/x.png")).unwrap();
        assert_eq!(json, "\"A/x.png\"");
    }
}

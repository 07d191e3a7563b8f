//! Application state: one catalog root, its config, and the catalog cache.
//!
//! [`App`] is constructed once at startup and every operation goes through
//! it, so the catalog is scanned at most once per process no matter how many
//! interactions follow.
//!
//! ```text
//! App::catalog  → CatalogCache::get_or_scan (scan on first use)
//! App::facets   → facets::facets(catalog)
//! App::browse   → filter::apply → paginate::paginate
//! App::download → download::prepare_download
//! ```

use crate::cache::CatalogCache;
use crate::config::AtlasConfig;
use crate::download::{self, Download};
use crate::facets::{self, Facet};
use crate::filter::{self, FilterSelection};
use crate::imaging::{ImageBackend, ImageError};
use crate::paginate::{self, PageError, PageView};
use crate::paths::ImagePath;
use crate::scan::{Catalog, ScanError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("Image not in catalog: {0}")]
    UnknownImage(String),
}

/// Result of a browse request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Browse {
    /// Nothing matched the selection. Not an error; there is nothing to page.
    NoResults,
    Page(PageView<ImagePath>),
}

/// Process-wide application state.
#[derive(Debug)]
pub struct App {
    root: PathBuf,
    config: AtlasConfig,
    catalogs: CatalogCache,
}

impl App {
    pub fn new(root: impl Into<PathBuf>, config: AtlasConfig) -> Self {
        Self {
            root: root.into(),
            config,
            catalogs: CatalogCache::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.catalogs
    }

    /// The catalog for the configured root, scanned on first use.
    pub fn catalog(&mut self) -> Result<&Catalog, ScanError> {
        self.catalogs.get_or_scan(&self.root)
    }

    /// Drop the cached catalog so the next call rescans the root.
    pub fn refresh(&mut self) {
        self.catalogs.invalidate(&self.root);
    }

    /// Non-empty facet levels of the full catalog.
    pub fn facets(&mut self) -> Result<Vec<Facet>, ScanError> {
        Ok(facets::facets(self.catalog()?.images()))
    }

    /// Every catalog entry matching `selection`, in catalog order.
    pub fn matches(&mut self, selection: &FilterSelection) -> Result<Vec<ImagePath>, ScanError> {
        Ok(filter::apply(self.catalog()?.images(), selection))
    }

    /// Filter the catalog and return page `page` (1-based) of the result.
    pub fn browse(&mut self, selection: &FilterSelection, page: usize) -> Result<Browse, AppError> {
        let matches = self.matches(selection)?;
        if matches.is_empty() {
            return Ok(Browse::NoResults);
        }
        let view = paginate::paginate(&matches, self.config.browse.images_per_page, page)?;
        Ok(Browse::Page(view))
    }

    /// Re-encode one catalog image for download.
    ///
    /// `image` must name an entry of the catalog exactly (relative, `/`
    /// separated); anything else fails with [`AppError::UnknownImage`].
    pub fn download(
        &mut self,
        backend: &impl ImageBackend,
        image: &str,
    ) -> Result<Download, AppError> {
        let catalog = self.catalog()?;
        let image = ImagePath::new(image);
        if !catalog.contains(&image) {
            return Err(AppError::UnknownImage(image.to_string()));
        }
        Ok(download::prepare_download(backend, catalog, &image)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    fn app_for(tmp: &TempDir) -> App {
        App::new(tmp.path(), AtlasConfig::default())
    }

    #[test]
    fn missing_root_surfaces_scan_error() {
        let tmp = TempDir::new().unwrap();
        let mut app = App::new(tmp.path().join("missing"), AtlasConfig::default());

        let result = app.browse(&FilterSelection::new(), 1);
        assert!(matches!(
            result,
            Err(AppError::Scan(ScanError::RootNotFound(_)))
        ));
    }

    #[test]
    fn catalog_scanned_once_across_calls() {
        let tmp = fake_tree(&["A/B/x.png", "A/C/y.jpg"]);
        let mut app = app_for(&tmp);

        app.facets().unwrap();
        app.browse(&FilterSelection::new(), 1).unwrap();
        app.catalog().unwrap();

        assert_eq!(app.cache().stats().scans, 1);
        assert_eq!(app.cache().stats().hits, 2);
    }

    #[test]
    fn refresh_picks_up_new_files() {
        let tmp = fake_tree(&["A/x.png"]);
        let mut app = app_for(&tmp);
        assert_eq!(app.catalog().unwrap().len(), 1);

        fs::write(tmp.path().join("A/y.png"), "fake image").unwrap();
        assert_eq!(app.catalog().unwrap().len(), 1);

        app.refresh();
        assert_eq!(app.catalog().unwrap().len(), 2);
    }

    #[test]
    fn facets_of_full_catalog() {
        let tmp = fake_tree(&["A/B/x.png", "A/C/y.jpg", "D/B/z.gif"]);
        let mut app = app_for(&tmp);

        let facets = app.facets().unwrap();
        assert_eq!(facets[0].values, vec!["A", "D"]);
        assert_eq!(facets[1].values, vec!["B", "C"]);
        assert_eq!(facets.len(), 3);
    }

    #[test]
    fn browse_returns_no_results_instead_of_paging() {
        let tmp = fake_tree(&["A/x.png"]);
        let mut app = app_for(&tmp);

        let selection = FilterSelection::new().with_search("nothing-matches");
        assert_eq!(app.browse(&selection, 1).unwrap(), Browse::NoResults);
    }

    #[test]
    fn browse_pages_with_configured_size() {
        let names: Vec<String> = (0..25).map(|i| format!("run/plot_{i:02}.png")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let tmp = fake_tree(&refs);
        let mut app = app_for(&tmp);

        let Browse::Page(view) = app.browse(&FilterSelection::new(), 3).unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(view.total_pages, 3);
        assert_eq!(strings(&view.items), vec!["run/plot_24.png"]);
    }

    #[test]
    fn browse_out_of_range_page_is_error() {
        let tmp = fake_tree(&["A/x.png"]);
        let mut app = app_for(&tmp);

        assert!(matches!(
            app.browse(&FilterSelection::new(), 2),
            Err(AppError::Page(PageError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn download_rejects_unknown_image() {
        let tmp = fake_tree(&["A/x.png"]);
        let mut app = app_for(&tmp);

        let result = app.download(&MockBackend::new(), "A/missing.png");
        assert!(matches!(result, Err(AppError::UnknownImage(_))));
    }

    #[test]
    fn download_known_image() {
        let tmp = fake_tree(&["A/x.png"]);
        let mut app = app_for(&tmp);

        let download = app.download(&MockBackend::new(), "A/x.png").unwrap();
        assert_eq!(download.file_name, "A_x.png");
    }
}

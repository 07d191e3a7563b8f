//! Catalog cache: scan each root once per process.
//!
//! Walking a large image tree costs far more than filtering the resulting
//! list, and the tree is a static, pre-generated set. [`CatalogCache`] keeps
//! the scanned [`Catalog`] for each root so every later interaction reuses it.
//!
//! # Design
//!
//! The cache is an ordinary value owned by the application state
//! ([`App`](crate::app::App)) and handed out by reference. There is no global
//! state; constructing a new cache is the same as restarting the process.
//!
//! ## Keys
//!
//! Entries are keyed by the root path exactly as given. Two spellings of the
//! same directory (`images` and `./images`) are two entries.
//!
//! ## Invalidation
//!
//! There is no filesystem watching. An entry lives until
//! [`invalidate`](CatalogCache::invalidate) or [`clear`](CatalogCache::clear)
//! is called. Failed scans are never stored, so a missing root is re-checked
//! on every lookup.

use crate::scan::{self, Catalog, ScanError};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::{Path, PathBuf};

/// Memoized catalogs keyed by root directory.
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: HashMap<PathBuf, Catalog>,
    stats: CacheStats,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the catalog for `root`, scanning it on first use.
    pub fn get_or_scan(&mut self, root: &Path) -> Result<&Catalog, ScanError> {
        match self.entries.entry(root.to_path_buf()) {
            Entry::Occupied(entry) => {
                self.stats.hit();
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let catalog = scan::scan(root)?;
                self.stats.scan();
                Ok(entry.insert(catalog))
            }
        }
    }

    /// Forget the catalog for `root`. Returns whether an entry existed.
    pub fn invalidate(&mut self, root: &Path) -> bool {
        self.entries.remove(root).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

/// Lookup counters for a cache's lifetime.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub scans: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn scan(&mut self) {
        self.scans += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.scans
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} scanned ({} total)",
                self.hits,
                self.scans,
                self.total()
            )
        } else {
            write!(f, "{} scanned", self.scans)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_lookup_scans() {
        let tmp = fake_tree(&["A/x.png"]);
        let mut cache = CatalogCache::new();

        let catalog = cache.get_or_scan(tmp.path()).unwrap();
        assert_eq!(catalog_strings(catalog), vec!["A/x.png"]);
        assert_eq!(cache.stats().scans, 1);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let tmp = fake_tree(&["A/x.png"]);
        let mut cache = CatalogCache::new();

        cache.get_or_scan(tmp.path()).unwrap();
        cache.get_or_scan(tmp.path()).unwrap();

        assert_eq!(
            cache.stats(),
            &CacheStats {
                hits: 1,
                scans: 1
            }
        );
    }

    #[test]
    fn cached_catalog_ignores_new_files() {
        let tmp = fake_tree(&["A/x.png"]);
        let mut cache = CatalogCache::new();
        cache.get_or_scan(tmp.path()).unwrap();

        fs::write(tmp.path().join("A/y.png"), "fake image").unwrap();

        let catalog = cache.get_or_scan(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn invalidate_forces_rescan() {
        let tmp = fake_tree(&["A/x.png"]);
        let mut cache = CatalogCache::new();
        cache.get_or_scan(tmp.path()).unwrap();

        fs::write(tmp.path().join("A/y.png"), "fake image").unwrap();
        assert!(cache.invalidate(tmp.path()));

        let catalog = cache.get_or_scan(tmp.path()).unwrap();
        assert_eq!(catalog_strings(catalog), vec!["A/x.png", "A/y.png"]);
        assert_eq!(cache.stats().scans, 2);
    }

    #[test]
    fn invalidate_unknown_root_is_noop() {
        let mut cache = CatalogCache::new();
        assert!(!cache.invalidate(Path::new("/nowhere")));
    }

    #[test]
    fn roots_are_cached_independently() {
        let a = fake_tree(&["a.png"]);
        let b = fake_tree(&["b1.png", "b2.png"]);
        let mut cache = CatalogCache::new();

        assert_eq!(cache.get_or_scan(a.path()).unwrap().len(), 1);
        assert_eq!(cache.get_or_scan(b.path()).unwrap().len(), 2);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.invalidate(a.path()));
    }

    #[test]
    fn failed_scan_is_not_cached() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("later");
        let mut cache = CatalogCache::new();

        assert!(matches!(
            cache.get_or_scan(&root),
            Err(ScanError::RootNotFound(_))
        ));
        assert!(cache.is_empty());

        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("x.png"), "fake image").unwrap();
        assert_eq!(cache.get_or_scan(&root).unwrap().len(), 1);
    }

    #[test]
    fn stats_display() {
        let only_scans = CacheStats { hits: 0, scans: 1 };
        assert_eq!(only_scans.to_string(), "1 scanned");

        let mixed = CacheStats { hits: 3, scans: 1 };
        assert_eq!(mixed.to_string(), "3 cached, 1 scanned (4 total)");
    }
}

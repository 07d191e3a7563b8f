//! # Plot Atlas
//!
//! A browser for directory trees of plot images. Your filesystem is the
//! catalog: every `.png`, `.jpg`, `.jpeg` or `.gif` below the root is listed by
//! its relative path, the first four directory levels become facets you can
//! select on, and free-text keywords narrow the result further.
//!
//! # Architecture: Scan Once, Query Many
//!
//! ```text
//! root/  →  Catalog (cached)  →  facets       (selector values per level)
//!                             →  filter       (selection + keywords)
//!                                  → paginate (one page of results)
//!                                      → output / render / download
//! ```
//!
//! The catalog is scanned once per root and kept in a [`cache::CatalogCache`]
//! owned by [`app::App`]. Everything downstream is a pure function of the
//! catalog and the current [`filter::FilterSelection`], so the filter and
//! paging logic is unit-tested without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`paths`] | Relative image paths: segments, captions, download names |
//! | [`scan`] | Walks the root directory and produces the sorted [`scan::Catalog`] |
//! | [`cache`] | Memoized catalogs keyed by root, with hit/scan statistics |
//! | [`facets`] | Distinct sorted values at each directory level |
//! | [`filter`] | Per-level selections and AND keyword search |
//! | [`paginate`] | Fixed-size pages with 1-based display ranges |
//! | [`app`] | Application state wiring scan, filter and paging together |
//! | [`config`] | `config.toml` loading, validation and stock defaults |
//! | [`imaging`] | Pure-Rust image probing and re-encoding |
//! | [`download`] | Re-encoded downloads under underscored file names |
//! | [`render`] | Static HTML image grid for a page, via Maud |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## `/` Everywhere
//!
//! Image paths are stored with `/` separators on every platform. Facets,
//! captions, search and download names all work on the same string, and the
//! JSON catalog is identical across operating systems.
//!
//! ## Strict Paging
//!
//! Asking for a page past the end is an error rather than a silent clamp to
//! the last page. An empty result is not paged at all; callers get
//! [`app::Browse::NoResults`] instead.
//!
//! ## Per-Item Image Failures
//!
//! A file that cannot be opened or decoded only affects its own grid cell or
//! export line. Only a missing catalog root stops the program.

pub mod app;
pub mod cache;
pub mod config;
pub mod download;
pub mod facets;
pub mod filter;
pub mod imaging;
pub mod output;
pub mod paginate;
pub mod paths;
pub mod render;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;

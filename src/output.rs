//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! The primary display for an image is its caption (`A / B / x.png`) led by a
//! positional index; the relative path is secondary context on an indented
//! `Source:` line. Indices on a page are global, so page 2 of a 12-per-page
//! listing starts at `013`.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Images in images/
//! 001 pbmc3k / leiden / umap.png
//! 002 pbmc3k / louvain / umap.png
//!
//! Found 2 images
//! ```
//!
//! ## Facets
//!
//! ```text
//! Level 1 (2 values)
//!     pbmc3k
//!     tabula
//! Level 2 (2 values)
//!     leiden
//!     louvain
//! ```
//!
//! ## Browse
//!
//! ```text
//! Filters: pbmc3k · Search: "umap"
//! 013 pbmc3k / leiden / umap.png
//!     Source: pbmc3k/leiden/umap.png
//!
//! Showing 13 - 24 of 25 images (page 2 of 3)
//! Next: --page 3
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::download::{Download, ExportResult};
use crate::facets::Facet;
use crate::filter::FilterSelection;
use crate::paginate::PageView;
use crate::paths::ImagePath;
use crate::scan::Catalog;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an image line: index + caption.
///
/// ```text
/// 001 pbmc3k / leiden / umap.png
/// ```
fn image_line(index: usize, image: &ImagePath) -> String {
    format!("{} {}", format_index(index), image.caption())
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Format the full catalog listing.
pub fn format_scan_output(catalog: &Catalog) -> Vec<String> {
    let mut lines = vec![format!("Images in {}/", catalog.root().display())];
    for (i, image) in catalog.images().iter().enumerate() {
        lines.push(image_line(i + 1, image));
    }
    lines.push(String::new());
    lines.push(format!(
        "Found {}",
        plural(catalog.len(), "image", "images")
    ));
    lines
}

pub fn print_scan_output(catalog: &Catalog) {
    print_lines(format_scan_output(catalog));
}

// ============================================================================
// Facets
// ============================================================================

/// Format facet levels. Levels are shown 1-based.
pub fn format_facets(facets: &[Facet]) -> Vec<String> {
    if facets.is_empty() {
        return vec!["No directory levels to filter on".to_string()];
    }
    let mut lines = Vec::new();
    for facet in facets {
        lines.push(format!(
            "Level {} ({})",
            facet.level + 1,
            plural(facet.values.len(), "value", "values")
        ));
        for value in &facet.values {
            lines.push(format!("{}{}", indent(1), value));
        }
    }
    lines
}

pub fn print_facets(facets: &[Facet]) {
    print_lines(format_facets(facets));
}

// ============================================================================
// Browse
// ============================================================================

/// Footer line with the 1-based display range.
pub fn page_footer<T>(view: &PageView<T>) -> String {
    format!(
        "Showing {} - {} of {} (page {} of {})",
        view.first_position(),
        view.last_position(),
        plural(view.total_items, "image", "images"),
        view.page,
        view.total_pages
    )
}

/// Format one page of browse results.
pub fn format_page(selection: &FilterSelection, view: &PageView<ImagePath>) -> Vec<String> {
    let mut lines = vec![selection.summary()];
    for (i, image) in view.items.iter().enumerate() {
        lines.push(image_line(view.offset + i + 1, image));
        lines.push(format!("{}Source: {}", indent(1), image));
    }
    lines.push(String::new());
    lines.push(page_footer(view));
    if !view.is_last() {
        lines.push(format!("Next: --page {}", view.page + 1));
    }
    lines
}

pub fn print_page(selection: &FilterSelection, view: &PageView<ImagePath>) {
    print_lines(format_page(selection, view));
}

pub fn format_no_results(selection: &FilterSelection) -> Vec<String> {
    vec![
        selection.summary(),
        "No images match the current filters.".to_string(),
    ]
}

pub fn print_no_results(selection: &FilterSelection) {
    print_lines(format_no_results(selection));
}

// ============================================================================
// Downloads
// ============================================================================

/// Format the result of a single download.
///
/// ```text
/// pbmc3k / leiden / umap.png → exports/pbmc3k_leiden_umap.png
///     image/png, 48213 bytes
/// ```
pub fn format_download(download: &Download, written: &Path) -> Vec<String> {
    vec![
        format!("{} \u{2192} {}", download.image.caption(), written.display()),
        format!(
            "{}{}, {}",
            indent(1),
            download.mime,
            plural(download.bytes.len(), "byte", "bytes")
        ),
    ]
}

pub fn print_download(download: &Download, written: &Path) {
    print_lines(format_download(download, written));
}

/// Format a batch export. Failures are listed inline with the rest.
///
/// ```text
/// Saved A_B_x.png
/// Failed A/bad.png: Decode failed: ...
///
/// Exported 1 of 2 images
/// ```
pub fn format_export_results(results: &[ExportResult]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut saved = 0;
    for result in results {
        match &result.outcome {
            Ok(path) => {
                saved += 1;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                lines.push(format!("Saved {}", name));
            }
            Err(e) => lines.push(format!("Failed {}: {}", result.image, e)),
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Exported {} of {}",
        saved,
        plural(results.len(), "image", "images")
    ));
    lines
}

pub fn print_export_results(results: &[ExportResult]) {
    print_lines(format_export_results(results));
}

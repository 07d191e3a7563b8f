//! HTML rendering of a page view.
//!
//! Produces one self-contained HTML file showing the current page as an image
//! grid: each cell has the image, its caption (`A / B / x.png`) and a download
//! link that saves the file under its underscored name. Images that cannot be
//! read render an inline error in their cell; the rest of the page is
//! unaffected.
//!
//! ## Output
//!
//! ```text
//! <h1>UMAP Atlas</h1>
//! <p class="filters">Filters: pbmc3k / * · Search: "leiden"</p>
//! <div class="grid">            ← `columns` wide
//!   <figure> img + caption + download link </figure>
//!   <div class="tile-error"> Could not load ... </div>
//! </div>
//! <footer>Showing 1 - 12 of 25 images · Page 1 of 3</footer>
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated text is escaped; image URLs are percent-encoded.

use crate::config::AtlasConfig;
use crate::filter::FilterSelection;
use crate::imaging::{Dimensions, ImageBackend};
use crate::paginate::PageView;
use crate::paths::ImagePath;
use crate::scan::Catalog;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; color: #111; }
h1 { font-weight: 500; }
.filters { color: #666; }
.grid { display: grid; grid-template-columns: repeat(var(--columns), 1fr); gap: 1rem; }
figure { margin: 0; }
figure img { width: 100%; height: auto; display: block; }
figcaption { font-size: 0.85rem; color: #444; margin: 0.25rem 0; word-break: break-all; }
.tile-error { border: 1px solid #d33; color: #d33; padding: 0.75rem; font-size: 0.85rem; }
.no-results { color: #a60; }
footer { margin-top: 2rem; color: #666; }
"#;

/// One grid cell, resolved before rendering.
#[derive(Debug, Clone)]
pub struct Tile {
    pub image: ImagePath,
    /// URL of the image file.
    pub src: String,
    /// Header dimensions, or the reason the image could not be read.
    pub status: Result<Dimensions, String>,
}

/// Resolve every image on the page, recording per-item read failures.
///
/// `asset_base` is the URL prefix for the catalog root (no trailing slash).
pub fn build_tiles(
    backend: &impl ImageBackend,
    catalog: &Catalog,
    view: &PageView<ImagePath>,
    asset_base: &str,
) -> Vec<Tile> {
    view.items
        .iter()
        .map(|image| Tile {
            image: image.clone(),
            src: format!("{}/{}", asset_base, encode_url_path(image.as_str())),
            status: backend
                .identify(&catalog.resolve(image))
                .map_err(|e| e.to_string()),
        })
        .collect()
}

/// Percent-encode a `/`-separated path for use in a URL.
///
/// Unreserved characters, `/` and `:` pass through; everything else is encoded
/// byte by byte.
pub fn encode_url_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' | b':' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// `file://` URL prefix for a directory, suitable as the `asset_base` of
/// [`build_tiles`]. Backslashes become `/`; the path is percent-encoded.
pub fn file_url(dir: &Path) -> String {
    let path = dir.to_string_lossy().replace('\\', "/");
    // Verbatim prefix from canonicalize on Windows
    let path = path.strip_prefix("//?/").unwrap_or(&path).trim_end_matches('/');
    if path.is_empty() || path.starts_with('/') {
        format!("file://{}", encode_url_path(path))
    } else {
        format!("file:///{}", encode_url_path(path))
    }
}

fn base_document(config: &AtlasConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.render.title) }
                style { (CSS) }
            }
            body style={ "--columns: " (config.browse.columns) } {
                h1 { (config.render.title) }
                (content)
            }
        }
    }
}

fn render_tile(tile: &Tile) -> Markup {
    let caption = tile.image.caption();
    let download_name = tile.image.download_name();
    html! {
        @match &tile.status {
            Ok(dims) => {
                figure {
                    img src=(tile.src) alt=(caption) width=(dims.width) height=(dims.height) loading="lazy";
                    figcaption { (caption) }
                    a.download href=(tile.src) download=(download_name) {
                        "Download - " (tile.image.file_name())
                    }
                }
            }
            Err(message) => {
                div.tile-error {
                    "Could not load " code { (tile.image.as_str()) } ": " (message)
                }
            }
        }
    }
}

/// Render a page of results.
pub fn render_page(
    config: &AtlasConfig,
    selection: &FilterSelection,
    view: &PageView<ImagePath>,
    tiles: &[Tile],
) -> Markup {
    let content = html! {
        p.filters { (selection.summary()) }
        div.grid {
            @for tile in tiles {
                (render_tile(tile))
            }
        }
        footer {
            "Showing " (view.first_position()) " - " (view.last_position())
            " of " (view.total_items) " images · Page " (view.page) " of " (view.total_pages)
        }
    };
    base_document(config, content)
}

/// Render the "no results" page.
pub fn render_no_results(config: &AtlasConfig, selection: &FilterSelection) -> Markup {
    let content = html! {
        p.filters { (selection.summary()) }
        p.no-results { "No images match the current filters." }
    };
    base_document(config, content)
}

/// Write rendered markup to `path`, creating parent directories.
pub fn write_html(path: &Path, markup: &Markup) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &markup.0)?;
    Ok(())
}

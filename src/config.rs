//! Browser configuration.
//!
//! Handles loading and validating `config.toml`. The file lives in
//! the catalog root next to the image directories (it is not an image, so the
//! scanner never lists it). Keys missing from the file keep their defaults, so
//! the file only needs the values it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [browse]
//! images_per_page = 12      # Images per page
//! columns = 4               # Grid columns in the HTML page
//!
//! [render]
//! title = "UMAP Atlas"      # Page title of the HTML page
//! ```
//!
//! ## Partial Configuration
//!
//! ```toml
//! # Only change the page size
//! [browse]
//! images_per_page = 24
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::paginate::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the catalog root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Browser configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtlasConfig {
    /// Paging and grid layout.
    pub browse: BrowseConfig,
    /// HTML page settings.
    pub render: RenderConfig,
}

impl AtlasConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.browse.images_per_page == 0 {
            return Err(ConfigError::Validation(
                "browse.images_per_page must be at least 1".into(),
            ));
        }
        if self.browse.columns == 0 {
            return Err(ConfigError::Validation(
                "browse.columns must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowseConfig {
    /// Number of images on one page.
    pub images_per_page: usize,
    /// Number of columns in the rendered image grid.
    pub columns: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            images_per_page: DEFAULT_PAGE_SIZE,
            columns: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Title shown in the browser tab and page heading.
    pub title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "UMAP Atlas".to_string(),
        }
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// Parse a `config.toml` document. Missing keys take their defaults,
/// unknown keys are rejected, and the result is validated.
pub fn parse_config(content: &str) -> Result<AtlasConfig, ConfigError> {
    let config: AtlasConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// A missing file (or missing directory; the scanner reports that case)
/// yields the defaults.
pub fn load_config(dir: &Path) -> Result<AtlasConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.is_file() {
        return Ok(AtlasConfig::default());
    }
    parse_config(&fs::read_to_string(&config_path)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# plot-atlas configuration
# ========================
# Place this file in the image root directory as config.toml.
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Browsing
# ---------------------------------------------------------------------------
[browse]
# Number of images shown on one page. Must be at least 1.
images_per_page = 12

# Number of columns in the HTML image grid. Must be at least 1.
columns = 4

# ---------------------------------------------------------------------------
# HTML page
# ---------------------------------------------------------------------------
[render]
# Title of the generated page.
title = "UMAP Atlas"
"##
}

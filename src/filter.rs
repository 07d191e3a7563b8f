//! Filter engine: per-level directory selection plus filename search.
//!
//! A [`FilterSelection`] holds one [`LevelChoice`] per directory level and a
//! free-text search string. [`apply`] narrows a list of image paths with it:
//!
//! 1. Each level with a concrete value keeps only paths whose segment at that
//!    depth equals the value. Paths too shallow to have that segment are
//!    dropped. Levels combine with AND.
//! 2. A non-blank search is split on whitespace into lowercase keywords. A
//!    path survives when its lowercased file name contains every keyword as a
//!    substring. Directory names are not searched.
//!
//! The output is always a subsequence of the input in the same order, so
//! applying a selection to a sorted catalog yields a sorted result.

use crate::facets::MAX_LEVELS;
use crate::paths::ImagePath;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("At most 4 directory levels can be selected, got {0}")]
    TooManyLevels(usize),
}

/// Text that stands for [`LevelChoice::All`] on the command line.
pub const ALL_TOKEN: &str = "*";

/// Choice for one directory level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LevelChoice {
    /// No filtering at this level.
    #[default]
    All,
    /// Keep only paths whose segment at this level equals the value.
    Value(String),
}

impl LevelChoice {
    pub fn value(&self) -> Option<&str> {
        match self {
            LevelChoice::All => None,
            LevelChoice::Value(v) => Some(v),
        }
    }
}

impl FromStr for LevelChoice {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_TOKEN {
            Ok(LevelChoice::All)
        } else {
            Ok(LevelChoice::Value(s.to_string()))
        }
    }
}

impl fmt::Display for LevelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelChoice::All => f.write_str(ALL_TOKEN),
            LevelChoice::Value(v) => f.write_str(v),
        }
    }
}

/// Level choices (depth 0..4) plus a search string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    levels: [LevelChoice; MAX_LEVELS],
    search: String,
}

impl FilterSelection {
    /// Selection that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from choices listed in level order. Missing levels are `All`.
    pub fn from_choices(
        choices: impl IntoIterator<Item = LevelChoice>,
    ) -> Result<Self, FilterError> {
        let choices: Vec<LevelChoice> = choices.into_iter().collect();
        if choices.len() > MAX_LEVELS {
            return Err(FilterError::TooManyLevels(choices.len()));
        }
        let mut selection = Self::new();
        for (level, choice) in choices.into_iter().enumerate() {
            selection.levels[level] = choice;
        }
        Ok(selection)
    }

    /// Set one level to a concrete value.
    ///
    /// # Panics
    ///
    /// Panics if `level >= MAX_LEVELS`.
    pub fn with_level(mut self, level: usize, value: impl Into<String>) -> Self {
        self.levels[level] = LevelChoice::Value(value.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn levels(&self) -> &[LevelChoice] {
        &self.levels
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Lowercased, whitespace-separated search keywords.
    pub fn keywords(&self) -> Vec<String> {
        self.search
            .split_whitespace()
            .map(|k| k.to_lowercase())
            .collect()
    }

    /// True when applying this selection would keep everything.
    pub fn is_unfiltered(&self) -> bool {
        self.levels.iter().all(|c| *c == LevelChoice::All) && self.search.trim().is_empty()
    }

    /// One-line description, e.g. `Filters: pbmc3k / * · Search: "leiden"`.
    ///
    /// Trailing `All` levels are omitted; no active level reads `all`.
    pub fn summary(&self) -> String {
        let levels = match self.levels.iter().rposition(|c| *c != LevelChoice::All) {
            Some(last) => self.levels[..=last]
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" / "),
            None => "all".to_string(),
        };
        let search = self.search.trim();
        if search.is_empty() {
            format!("Filters: {levels}")
        } else {
            format!("Filters: {levels} · Search: \"{search}\"")
        }
    }

    fn matches_levels(&self, image: &ImagePath) -> bool {
        self.levels
            .iter()
            .enumerate()
            .all(|(level, choice)| match choice.value() {
                None => true,
                Some(wanted) => image.segment(level) == Some(wanted),
            })
    }
}

/// Every keyword must occur in the lowercased file name. No keywords match all.
fn matches_keywords(image: &ImagePath, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let name = image.file_name().to_lowercase();
    keywords.iter().all(|k| name.contains(k.as_str()))
}

/// Apply `selection` to `images`, keeping their relative order.
///
/// An empty result is not an error; callers report "no results" and skip
/// pagination.
pub fn apply(images: &[ImagePath], selection: &FilterSelection) -> Vec<ImagePath> {
    if selection.is_unfiltered() {
        return images.to_vec();
    }
    let keywords = selection.keywords();
    images
        .iter()
        .filter(|img| selection.matches_levels(img) && matches_keywords(img, &keywords))
        .cloned()
        .collect()
}

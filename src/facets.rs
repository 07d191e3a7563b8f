//! Facet extraction: the distinct directory names seen at each depth.
//!
//! Facets populate the per-level selectors. Level 0 is the first directory
//! below the root, level 3 the fourth. A level with no values means the
//! collection is not that deep and no selector is offered for it.

use crate::paths::ImagePath;
use serde::Serialize;
use std::collections::BTreeSet;

/// Number of directory levels exposed as filters.
pub const MAX_LEVELS: usize = 4;

/// Distinct values at one directory level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    /// 0-based directory depth.
    pub level: usize,
    /// Sorted, unique segment values.
    pub values: Vec<String>,
}

/// Sorted set of segment values found at `level` across `images`.
///
/// Paths shorter than `level + 1` segments contribute nothing.
pub fn facet_values(images: &[ImagePath], level: usize) -> Vec<String> {
    images
        .iter()
        .filter_map(|img| img.segment(level))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Facets for levels `0..MAX_LEVELS`, stopping at the first empty level.
///
/// A path that has a segment at level `n` also has one at every shallower
/// level, so once a level is empty every deeper level is empty too.
pub fn facets(images: &[ImagePath]) -> Vec<Facet> {
    (0..MAX_LEVELS)
        .map(|level| Facet {
            level,
            values: facet_values(images, level),
        })
        .take_while(|facet| !facet.values.is_empty())
        .collect()
}

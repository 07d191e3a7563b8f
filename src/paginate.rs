//! Fixed-size pagination over a filtered result.
//!
//! Pages are 1-based. Page `n` holds `items[(n-1)*size .. min(n*size, len)]`,
//! so every page but the last is full and the pages, concatenated in order,
//! reproduce the input exactly.
//!
//! Out-of-range page numbers are rejected with [`PageError::OutOfRange`]
//! rather than clamped. An empty input is rejected too: "no results" is
//! handled before pagination.

use serde::Serialize;
use thiserror::Error;

/// Default number of images shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PageError {
    #[error("Nothing to paginate: the result is empty")]
    NoItems,
    #[error("Page size must be at least 1")]
    ZeroPageSize,
    #[error("Page {page} is out of range (1-{total_pages})")]
    OutOfRange { page: usize, total_pages: usize },
}

/// One page of a larger result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView<T> {
    /// Items on this page, in result order.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    pub total_pages: usize,
    /// Length of the whole (unpaginated) result.
    pub total_items: usize,
    /// 0-based index of `items[0]` in the whole result.
    pub offset: usize,
}

impl<T> PageView<T> {
    /// 1-based position of the first item on the page.
    pub fn first_position(&self) -> usize {
        self.offset + 1
    }

    /// 1-based position of the last item on the page.
    pub fn last_position(&self) -> usize {
        self.offset + self.items.len()
    }

    pub fn is_last(&self) -> bool {
        self.page == self.total_pages
    }
}

/// `ceil(len / page_size)`. Zero items means zero pages.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Slice out page `page_number` (1-based) of `items`.
pub fn paginate<T: Clone>(
    items: &[T],
    page_size: usize,
    page_number: usize,
) -> Result<PageView<T>, PageError> {
    if page_size == 0 {
        return Err(PageError::ZeroPageSize);
    }
    if items.is_empty() {
        return Err(PageError::NoItems);
    }
    let total = total_pages(items.len(), page_size);
    if page_number == 0 || page_number > total {
        return Err(PageError::OutOfRange {
            page: page_number,
            total_pages: total,
        });
    }

    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Ok(PageView {
        items: items[start..end].to_vec(),
        page: page_number,
        total_pages: total,
        total_items: items.len(),
        offset: start,
    })
}

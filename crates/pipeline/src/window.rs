//! Windowing stage: the accumulating "load more" pagination.
//!
//! The displayed window is always a prefix of the filtered+sorted sequence
//! of length `page * page_size`. Loading more grows the prefix; any change
//! to filters, sort or search resets it to the first page.

use serde::Serialize;
use std::ops::Range;

/// Default number of items revealed per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Pagination state. `page` starts at 1 and `page_size` is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    page: usize,
    page_size: usize,
}

impl Window {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// How many of `total` items are displayed.
    pub fn visible_len(&self, total: usize) -> usize {
        self.page.saturating_mul(self.page_size).min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.page.saturating_mul(self.page_size) < total
    }

    /// Reveal the next page and return the index range that was appended.
    ///
    /// When nothing remains the range is empty and the page does not move.
    pub fn load_more(&mut self, total: usize) -> Range<usize> {
        let start = self.visible_len(total);
        if !self.has_more(total) {
            return start..start;
        }
        self.page += 1;
        start..self.visible_len(total)
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// What a list page renders: the window plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    /// Length of the full filtered+sorted sequence
    pub total: usize,
    pub has_more: bool,
}

/// Cut the displayed prefix out of a filtered+sorted list.
pub fn paginate<T>(mut items: Vec<T>, window: &Window) -> PageView<T> {
    let total = items.len();
    items.truncate(window.visible_len(total));
    PageView {
        items,
        page: window.page(),
        page_size: window.page_size(),
        total,
        has_more: window.has_more(total),
    }
}

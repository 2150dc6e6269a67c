//! Client-side pagination of the location table

use std::ops::Range;

/// Rows per page of the location table
pub const PAGE_SIZE: usize = 15;

/// Tracks the current page over a locally held list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    item_count: usize,
    page_size: usize,
    current: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Paginator {
    pub fn new(item_count: usize) -> Self {
        Self::with_page_size(item_count, PAGE_SIZE)
    }

    /// A zero page size is treated as one
    pub fn with_page_size(item_count: usize, page_size: usize) -> Self {
        Self {
            item_count,
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_count(&self) -> usize {
        self.item_count.div_ceil(self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Moves to `page`; pages outside `1..=page_count` are ignored
    pub fn change_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.page_count() {
            self.current = page;
            true
        } else {
            false
        }
    }

    /// New list contents; always back to page 1
    pub fn reset(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.current = 1;
    }

    /// Index range of the current page, clamped to the item count
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(self.item_count);
        let end = (self.current * self.page_size).min(self.item_count);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }
}

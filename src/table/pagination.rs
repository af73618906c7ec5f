use std::ops::Range;

pub const PAGE_SIZE: usize = 10;

/// Client-side pager over an already loaded item list. Pages are numbered
/// from 1. The page index is never clamped when the list shrinks, so a page
/// past the end shows nothing until the operator moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pager {
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

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Index range of the current page within a list of `len` items.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = (self.page - 1) * self.page_size;
        start.min(len)..(start + self.page_size).min(len)
    }

    pub fn can_prev(&self) -> bool {
        self.page != 1
    }

    pub fn can_next(&self, len: usize) -> bool {
        self.page != self.total_pages(len)
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn next(&mut self, len: usize) {
        self.page = (self.page + 1).min(self.total_pages(len));
    }

    /// Jump to `page`, limited to the pages that exist for `len` items.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.page = page.clamp(1, self.total_pages(len));
    }
}

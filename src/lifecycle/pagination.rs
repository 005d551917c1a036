pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// Page window over a displayed collection. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_size: usize,
    current_page: usize,
    max_visible_pages: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
        }
    }
}

impl PaginationState {
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn max_visible_pages(&self) -> usize {
        self.max_visible_pages
    }

    /// Always goes back to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.current_page = 1;
    }

    /// Not bounded by the collection: a page past the end shows nothing.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn current_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(items.len());
        if start >= items.len() {
            return &[];
        }
        &items[start..end]
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Page numbers for the pager, at most `max_visible_pages` of them,
    /// centred on the current page where possible.
    pub fn visible_pages(&self, total: usize) -> Vec<usize> {
        let count = self.page_count(total);
        if count == 0 {
            return Vec::new();
        }
        let width = self.max_visible_pages().min(count);
        let current = self.current_page.min(count);
        let mut first = current.saturating_sub(width / 2).max(1);
        if first + width - 1 > count {
            first = count + 1 - width;
        }
        (first..first + width).collect()
    }
}

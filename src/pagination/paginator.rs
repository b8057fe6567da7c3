use serde::{Deserialize, Serialize};

/// Page size used when none is given
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of page buttons shown before the list is compacted with ellipses
pub const MAX_VISIBLE_PAGES: usize = 5;

/// 1-based inclusive item ordinals shown on the current page; `{0, 0}` when empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
}

impl PageRange {
    /// Number of items covered by the range
    pub fn len(&self) -> usize {
        if self.start == 0 {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of the page selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Slices an ordered list into fixed-size pages and tracks the current one
///
/// Navigation never fails: out-of-range requests are clamped and impossible
/// moves are no-ops.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator<T> {
    items: Vec<T>,
    current_page: usize,
    page_size: usize,
}

impl<T> Paginator<T> {
    /// Create a paginator positioned on the first page. A zero page size is treated as 1.
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(items / page_size)`, 0 when there are no items
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// Full backing list
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_page_items(&self) -> &[T] {
        let start = (self.current_page - 1) * self.page_size;
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.has_previous_page() {
            self.current_page -= 1;
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.current_page = if total == 0 { 1 } else { page.clamp(1, total) };
    }

    pub fn go_to_first_page(&mut self) {
        self.current_page = 1;
    }

    pub fn go_to_last_page(&mut self) {
        self.current_page = self.total_pages().max(1);
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    /// False on an empty paginator, which has no last page
    pub fn is_last_page(&self) -> bool {
        self.current_page == self.total_pages()
    }

    /// Replace the items and go back to page 1
    pub fn update_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 1;
    }

    pub fn page_range(&self) -> PageRange {
        if self.items.is_empty() {
            return PageRange::default();
        }
        let start = (self.current_page - 1) * self.page_size + 1;
        let end = (start + self.page_size - 1).min(self.items.len());
        PageRange { start, end }
    }

    /// Page selector entries, compacted with ellipses past `max_visible` pages
    ///
    /// With `max_visible = 5`: near the start `1 2 3 4 … N`, near the end
    /// `1 … N-3 N-2 N-1 N`, elsewhere `1 … p-1 p p+1 … N`. Wider limits grow
    /// the blocks. Below 5 there is no room for both ends, so the result is a
    /// plain window of `max_visible` pages around the current one.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<PageLink> {
        let total = self.total_pages();
        let current = self.current_page;

        if total <= max_visible {
            return (1..=total).map(PageLink::Page).collect();
        }

        if max_visible < MAX_VISIBLE_PAGES {
            let width = max_visible.max(1);
            let start = current.saturating_sub((width - 1) / 2).max(1);
            let end = (start + width - 1).min(total);
            let start = (end + 1).saturating_sub(width).max(1);
            return (start..=end).map(PageLink::Page).collect();
        }

        // Pages between the two ends when both ellipses are shown
        let window = max_visible - 2;
        let before = (window - 1) / 2;
        let after = window - 1 - before;

        let mut links = Vec::with_capacity(max_visible + 2);
        if current <= max_visible - 2 {
            links.extend((1..max_visible).map(PageLink::Page));
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(total));
        } else if current + (max_visible - 3) >= total {
            links.push(PageLink::Page(1));
            links.push(PageLink::Ellipsis);
            links.extend((total + 2 - max_visible..=total).map(PageLink::Page));
        } else {
            links.push(PageLink::Page(1));
            links.push(PageLink::Ellipsis);
            links.extend((current - before..=current + after).map(PageLink::Page));
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(total));
        }
        links
    }
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_PAGE_SIZE)
    }
}

use std::ops::Range;

use tracing::debug;

use flow_model::PageState;

/// The slice of a result set shown on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Requested index clamped to the last available page (0 when empty).
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }
}

pub fn page_window(total_count: usize, page: &PageState) -> PageWindow {
    let page_size = page.effective_size();
    let total_pages = total_count.div_ceil(page_size);
    let page_index = page.page_index.min(total_pages.saturating_sub(1));
    if page_index != page.page_index {
        debug!(
            requested = page.page_index,
            clamped = page_index,
            total_pages,
            "page index clamped"
        );
    }
    let start = (page_index * page_size).min(total_count);
    let end = (start + page_size).min(total_count);
    PageWindow {
        page_index,
        page_size,
        total_pages,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_pages() {
        let window = page_window(0, &PageState::new(10).at(3));
        assert_eq!(window.total_pages, 0);
        assert_eq!(window.page_index, 0);
        assert_eq!(window.range(), 0..0);
    }

    #[test]
    fn out_of_range_index_clamps_to_last_page() {
        let window = page_window(23, &PageState::new(10).at(7));
        assert_eq!(window.total_pages, 3);
        assert_eq!(window.page_index, 2);
        assert_eq!(window.range(), 20..23);
        assert!(!window.has_next());
        assert!(window.has_previous());
    }

    #[test]
    fn zero_page_size_is_one_row() {
        let page = PageState {
            page_index: 1,
            page_size: 0,
        };
        let window = page_window(3, &page);
        assert_eq!(window.page_size, 1);
        assert_eq!(window.range(), 1..2);
    }
}

//! Fixed-size pagination over the filtered, ranked list.

use std::ops::Range;

/// Cards per page.
pub const PAGE_SIZE: usize = 24;

/// Number of pages needed for `total_items`. Never less than one, so an
/// empty result still has a (blank) first page.
pub fn total_pages(total_items: usize) -> usize {
    total_items.div_ceil(PAGE_SIZE).max(1)
}

/// Clamp a requested page into `[1, total_pages(total_items)]`.
pub fn clamp_page(page: usize, total_items: usize) -> usize {
    page.clamp(1, total_pages(total_items))
}

/// The slice bounds and navigation flags for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-indexed, already clamped.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Indices into the full list shown on this page.
    pub range: Range<usize>,
}

impl PageWindow {
    /// Window for `page` over `total_items`, clamping out-of-range pages.
    pub fn new(page: usize, total_items: usize) -> Self {
        let page = clamp_page(page, total_items);
        let start = ((page - 1) * PAGE_SIZE).min(total_items);
        let end = (page * PAGE_SIZE).min(total_items);
        Self {
            page,
            total_pages: total_pages(total_items),
            total_items,
            range: start..end,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The items of `items` on this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.range.end.min(items.len());
        let start = self.range.start.min(end);
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- total_pages ---------------------------------------------------------

    #[test]
    fn total_pages_rounds_up_and_never_zero() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(24), 1);
        assert_eq!(total_pages(25), 2);
        assert_eq!(total_pages(100), 5);
    }

    // -- PageWindow ----------------------------------------------------------

    #[test]
    fn last_page_holds_the_remainder() {
        let window = PageWindow::new(5, 100);
        assert_eq!(window.range, 96..100);
        assert_eq!(window.len(), 4);
        assert!(window.has_prev());
        assert!(!window.has_next());
    }

    #[test]
    fn full_pages_hold_twenty_four() {
        for page in 1..=4 {
            assert_eq!(PageWindow::new(page, 100).len(), PAGE_SIZE);
        }
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        assert_eq!(PageWindow::new(0, 50).page, 1);
        assert_eq!(PageWindow::new(99, 50).page, 3);
    }

    #[test]
    fn empty_result_is_page_one_with_nothing() {
        let window = PageWindow::new(3, 0);
        assert_eq!(window.page, 1);
        assert!(window.is_empty());
        assert!(!window.has_prev());
        assert!(!window.has_next());
    }

    #[test]
    fn slice_returns_page_items() {
        let items: Vec<usize> = (0..30).collect();
        let window = PageWindow::new(2, items.len());
        assert_eq!(window.slice(&items), &[24, 25, 26, 27, 28, 29]);
    }
}

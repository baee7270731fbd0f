//! Pagination policy shared by every paged view
//!
//! A [`PageWindow`] is a pure value built from `(offset, limit, total)`. It
//! answers what range is on screen, whether "previous"/"next" are enabled and
//! where those intents lead. Views own their `offset`; nothing here is stored.

use serde::Serialize;

/// Default page size for the table and map views
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Position of a view within a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: usize,
    limit: usize,
    total: usize,
}

/// Display range and navigation state for one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageBounds {
    /// 1-based index of the first row shown, 0 when there are no rows
    pub lower: usize,
    /// 1-based index of the last row shown
    pub upper: usize,
    pub total: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl PageWindow {
    /// `limit` is clamped to at least 1 so "next" always advances
    #[must_use]
    pub fn new(offset: usize, limit: usize, total: usize) -> Self {
        Self {
            offset,
            limit: limit.max(1),
            total,
        }
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn bounds(&self) -> PageBounds {
        PageBounds {
            lower: if self.total > 0 { self.offset + 1 } else { 0 },
            upper: self.offset.saturating_add(self.limit).min(self.total),
            total: self.total,
            can_go_previous: self.offset > 0,
            can_go_next: self.offset.saturating_add(self.limit) < self.total,
        }
    }

    /// Offset of the previous page, never below zero
    #[must_use]
    pub const fn previous(&self) -> usize {
        self.offset.saturating_sub(self.limit)
    }

    /// Offset of the next page, `None` when already on the last page
    #[must_use]
    pub fn next(&self) -> Option<usize> {
        self.bounds()
            .can_go_next
            .then_some(self.offset.saturating_add(self.limit))
    }
}

impl PageBounds {
    /// `Showing X-Y of Z`
    #[must_use]
    pub fn label(&self) -> String {
        format!("Showing {}-{} of {}", self.lower, self.upper, self.total)
    }
}

/// Offset to show after a row was deleted from the current page.
///
/// `total_after` is the count re-read after the delete. When the old offset
/// now points past the end, step back one page so the view never lands on an
/// empty trailing page. Otherwise the offset is kept.
#[must_use]
pub const fn offset_after_delete(offset: usize, limit: usize, total_after: usize) -> usize {
    if offset >= total_after && offset > 0 {
        offset.saturating_sub(limit)
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_result_shows_zero_range() {
        let bounds = PageWindow::new(0, 50, 0).bounds();
        assert_eq!(bounds.lower, 0);
        assert_eq!(bounds.upper, 0);
        assert!(!bounds.can_go_previous);
        assert!(!bounds.can_go_next);
        assert_eq!(bounds.label(), "Showing 0-0 of 0");
    }

    #[test]
    fn last_partial_page_caps_upper_bound() {
        let window = PageWindow::new(5, 5, 7);
        let bounds = window.bounds();
        assert_eq!(bounds.lower, 6);
        assert_eq!(bounds.upper, 7);
        assert!(bounds.can_go_previous);
        assert!(!bounds.can_go_next);
        assert_eq!(window.next(), None);
        assert_eq!(bounds.label(), "Showing 6-7 of 7");
    }

    #[test]
    fn first_page_of_many() {
        let window = PageWindow::new(0, 10, 25);
        let bounds = window.bounds();
        assert_eq!((bounds.lower, bounds.upper), (1, 10));
        assert!(!bounds.can_go_previous);
        assert!(bounds.can_go_next);
        assert_eq!(window.next(), Some(10));
        assert_eq!(window.previous(), 0);
    }

    #[test]
    fn exact_multiple_has_no_next() {
        let window = PageWindow::new(10, 10, 20);
        assert!(!window.bounds().can_go_next);
        assert_eq!(window.next(), None);
        assert_eq!(window.previous(), 0);
    }

    #[test]
    fn previous_saturates_at_zero() {
        assert_eq!(PageWindow::new(3, 10, 40).previous(), 0);
        assert_eq!(PageWindow::new(25, 10, 40).previous(), 15);
    }

    #[test]
    fn zero_limit_is_clamped() {
        let window = PageWindow::new(0, 0, 3);
        assert_eq!(window.limit(), 1);
        assert_eq!(window.next(), Some(1));
    }

    #[test]
    fn offset_past_end_still_reports_consistent_bounds() {
        let bounds = PageWindow::new(20, 10, 11).bounds();
        assert_eq!(bounds.upper, 11);
        assert!(bounds.can_go_previous);
        assert!(!bounds.can_go_next);
    }

    #[test]
    fn delete_last_row_of_last_page_steps_back() {
        // 11 records, page size 10, viewing the single record on page 2
        assert_eq!(offset_after_delete(10, 10, 10), 0);
    }

    #[test]
    fn delete_keeps_offset_when_page_still_has_rows() {
        assert_eq!(offset_after_delete(10, 10, 12), 10);
        assert_eq!(offset_after_delete(0, 10, 0), 0);
        assert_eq!(offset_after_delete(0, 10, 5), 0);
    }
}

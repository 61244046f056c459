//! Pagination and facet summaries.

use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages; zero when there are no items.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info, clamping `page` into `[1, max(1, total_pages)]`.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page);
        let page = clamp_page(page, total_pages);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Whether page navigation has anywhere to go.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// Get start item number (1-indexed), zero when empty.
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }

    /// Slice `items` down to this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.per_page).min(items.len());
        &items[start..end]
    }
}

/// Clamp a requested page into `[1, max(1, total_pages)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Price bounds across a product list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Range used when there are no prices to inspect.
    pub const FALLBACK: PriceRange = PriceRange {
        min: 0.0,
        max: 1000.0,
    };

    /// Floor of the lowest and ceiling of the highest price, or
    /// [`PriceRange::FALLBACK`] for an empty input.
    pub fn from_prices(prices: impl IntoIterator<Item = f64>) -> Self {
        let mut iter = prices.into_iter();
        let Some(first) = iter.next() else {
            return Self::FALLBACK;
        };
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Self {
            min: min.floor(),
            max: max.ceil(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn test_pagination_last_page() {
        let p = Pagination::new(5, 10, 45);
        assert!(p.has_prev);
        assert!(!p.has_next);
        assert!(p.is_last());
        assert_eq!(p.end_item(), 45);
    }

    #[test]
    fn test_pagination_single_page_has_no_controls() {
        let p = Pagination::new(1, 6, 5);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert!(!p.has_prev);
        assert!(!p.shows_controls());
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 6, 0);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
        assert!(!p.shows_controls());
    }

    #[test]
    fn test_pagination_clamps_requested_page() {
        assert_eq!(Pagination::new(9, 10, 45).page, 5);
        assert_eq!(Pagination::new(0, 10, 45).page, 1);
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let near_end = Pagination::new(10, 10, 100);
        assert_eq!(near_end.page_numbers(5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_pagination_slice() {
        let items: Vec<u32> = (1..=14).collect();
        let p = Pagination::new(3, 6, items.len());
        assert_eq!(p.slice(&items), &[13, 14]);
        assert_eq!(p.start_item(), 13);
    }

    #[test]
    fn test_price_range() {
        let range = PriceRange::from_prices([19.99, 199.99, 49.99]);
        assert_eq!(range, PriceRange { min: 19.0, max: 200.0 });
        assert_eq!(PriceRange::from_prices(Vec::new()), PriceRange::FALLBACK);
    }
}

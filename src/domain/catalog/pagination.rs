//! Pagination metadata returned alongside every paged listing.

use serde::{Deserialize, Serialize};

/// Page bookkeeping for a listing response.
///
/// Invariant after [`Pagination::normalized`]: `current_page` lies in
/// `1..=max(pages, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

fn first_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Pagination {
    /// An empty first page.
    pub fn empty(per_page: u32) -> Self {
        Self {
            total: 0,
            pages: 0,
            current_page: 1,
            per_page,
            has_next: false,
            has_prev: false,
        }
    }

    /// Number of pages needed for `total` items, `ceil(total / per_page)`.
    pub fn pages_for(total: u64, per_page: u32) -> u32 {
        if per_page == 0 {
            return 0;
        }
        total.div_ceil(per_page as u64) as u32
    }

    /// Clamps `current_page` into range and guards against a zero page size.
    /// A known `total` decides the page count.
    pub fn normalized(mut self) -> Self {
        if self.per_page == 0 {
            self.per_page = default_per_page();
        }
        if self.total > 0 || self.pages == 0 {
            self.pages = Self::pages_for(self.total, self.per_page);
        }
        let last = self.pages.max(1);
        self.current_page = self.current_page.clamp(1, last);
        self.has_prev = self.current_page > 1;
        self.has_next = self.current_page < self.pages;
        self
    }

    /// 1-based inclusive bounds of the items on the current page, for
    /// "Showing 21-40 of 95" labels. `None` when the listing is empty.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 {
            return None;
        }
        let per_page = self.per_page as u64;
        let current = self.current_page.max(1) as u64;
        let start = (current - 1) * per_page + 1;
        if start > self.total {
            return None;
        }
        let end = (current * per_page).min(self.total);
        Some((start, end))
    }

    /// Whether a page navigator is worth showing.
    pub fn has_multiple_pages(&self) -> bool {
        self.pages > 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty(default_per_page())
    }
}

/// Page selection sent with paged user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// First page of `per_page` items.
    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    pub fn next(&self) -> Self {
        Self::new(self.page + 1, self.per_page)
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(default_per_page())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: u64, pages: u32, current_page: u32, per_page: u32) -> Pagination {
        Pagination {
            total,
            pages,
            current_page,
            per_page,
            has_next: false,
            has_prev: false,
        }
    }

    #[test]
    fn pages_for_rounds_up() {
        assert_eq!(Pagination::pages_for(0, 20), 0);
        assert_eq!(Pagination::pages_for(20, 20), 1);
        assert_eq!(Pagination::pages_for(21, 20), 2);
        assert_eq!(Pagination::pages_for(5, 0), 0);
    }

    #[test]
    fn normalized_clamps_page_beyond_last() {
        let normalized = page(45, 3, 9, 20).normalized();
        assert_eq!(normalized.current_page, 3);
        assert!(normalized.has_prev);
        assert!(!normalized.has_next);
    }

    #[test]
    fn normalized_keeps_page_one_for_empty_listing() {
        let normalized = page(0, 0, 0, 20).normalized();
        assert_eq!(normalized.current_page, 1);
        assert!(!normalized.has_prev);
        assert!(!normalized.has_next);
    }

    #[test]
    fn normalized_recomputes_pages_from_total() {
        let normalized = page(41, 7, 3, 20).normalized();
        assert_eq!(normalized.pages, 3);
        assert!(!normalized.has_next);

        let shrunk = Pagination { total: 40, ..page(41, 3, 2, 20) }.normalized();
        assert_eq!(shrunk.pages, 2);
        assert_eq!(shrunk.current_page, 2);
        assert!(!shrunk.has_next);
    }

    #[test]
    fn item_range_for_middle_and_last_page() {
        assert_eq!(page(95, 5, 2, 20).item_range(), Some((21, 40)));
        assert_eq!(page(95, 5, 5, 20).item_range(), Some((81, 95)));
        assert_eq!(Pagination::empty(20).item_range(), None);
    }

    #[test]
    fn page_request_never_goes_below_one() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request, PageRequest { page: 1, per_page: 1 });
        assert_eq!(request.next().page, 2);
        assert_eq!(
            PageRequest::first(4).to_params(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("per_page".to_string(), "4".to_string())
            ]
        );
    }

    #[test]
    fn deserializes_api_shape() {
        let pagination: Pagination = serde_json::from_str(
            r#"{"total": 41, "pages": 3, "current_page": 2, "per_page": 20,
                "has_next": true, "has_prev": true}"#,
        )
        .unwrap();
        assert_eq!(pagination, page(41, 3, 2, 20).normalized());
    }
}

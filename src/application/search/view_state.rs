//! SearchViewState - What the search page renders.

use crate::domain::catalog::{BookSummary, Pagination, Tag};
use crate::domain::search::{ActiveFilter, FilterState, ViewMode};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchViewState {
    pub filters: FilterState,
    pub books: Vec<BookSummary>,
    pub tags: Vec<Tag>,
    pub pagination: Pagination,
    /// Only set in the tags view.
    pub tag_pagination: Option<Pagination>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SearchViewState {
    pub fn new(per_page: u32) -> Self {
        Self {
            filters: FilterState::default(),
            books: Vec::new(),
            tags: Vec::new(),
            pagination: Pagination::empty(per_page),
            tag_pagination: None,
            loading: false,
            error: None,
        }
    }

    /// A finished, successful load with nothing to show. Distinct from an
    /// error.
    pub fn is_empty(&self) -> bool {
        if self.loading || self.error.is_some() {
            return false;
        }
        match self.filters.view {
            ViewMode::Tags => self.tags.is_empty(),
            ViewMode::Grid | ViewMode::List => self.books.is_empty(),
        }
    }

    /// `(first, last, total)` for the "Showing 21-40 of 95 results" label.
    pub fn result_range(&self) -> Option<(u64, u64, u64)> {
        self.pagination
            .item_range()
            .map(|(start, end)| (start, end, self.pagination.total))
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        self.filters.active_filters()
    }
}

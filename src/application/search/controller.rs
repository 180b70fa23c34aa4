//! SearchController - Fetch-on-navigation for the search page.
//!
//! The URL is the only source of truth. Filter actions never touch the view
//! state directly; they compute the next URL and push it through the
//! [`Navigator`]. The router then hands the new query string to
//! [`SearchController::navigate_to`], which is the only place results are
//! fetched.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::SearchViewState;
use crate::application::api::BooksApi;
use crate::application::gateway::{ApiError, ApiGateway};
use crate::application::session::SessionStore;
use crate::domain::catalog::{BookPage, PageRequest, Tag, TagPage};
use crate::domain::search::{self, FilterState, FilterUpdate, SortBy, ViewMode};
use crate::ports::Navigator;

pub const SEARCH_ERROR_MESSAGE: &str = "Failed to load search results. Please try again later.";

/// Page size of the browse-by-tag listing.
pub const TAGS_PER_PAGE: u32 = 50;

pub struct SearchController {
    books: BooksApi,
    navigator: Arc<dyn Navigator>,
    session: Option<Arc<SessionStore>>,
    per_page: AtomicU32,
    generation: AtomicU64,
    location: RwLock<String>,
    state: RwLock<SearchViewState>,
}

impl SearchController {
    pub fn new(gateway: Arc<ApiGateway>, navigator: Arc<dyn Navigator>, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        Self {
            books: BooksApi::new(gateway),
            navigator,
            session: None,
            per_page: AtomicU32::new(per_page),
            generation: AtomicU64::new(0),
            location: RwLock::new(String::new()),
            state: RwLock::new(SearchViewState::new(per_page)),
        }
    }

    /// Reports 401 answers to `session`.
    pub fn with_session(mut self, session: Arc<SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn state(&self) -> SearchViewState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn filters(&self) -> FilterState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .filters
            .clone()
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.load(Ordering::SeqCst)
    }

    /// Loads results for a new location's query string.
    ///
    /// Only the most recent navigation's results are ever applied; earlier
    /// ones that resolve late are dropped.
    pub async fn navigate_to(&self, query_string: &str) {
        let filters = search::decode(query_string);
        let generation = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *self.location.write().unwrap_or_else(PoisonError::into_inner) =
                query_string.to_string();
            state.filters = filters.clone();
            state.loading = true;
            state.error = None;
            generation
        };

        tracing::debug!("Search navigation #{}: {:?}", generation, filters);
        let (books, tags) = tokio::join!(self.fetch_books(&filters), self.fetch_tags(&filters));

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Dropping results of superseded search navigation #{}", generation);
            return;
        }

        match (books, tags) {
            (Ok(page), Ok(tags)) => {
                state.books = page.books;
                state.pagination = page.pagination;
                match tags {
                    Some(tags) => {
                        state.tags = tags.tags;
                        state.tag_pagination = Some(tags.pagination);
                    }
                    None => {
                        state.tags.clear();
                        state.tag_pagination = None;
                    }
                }
                state.error = None;
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Search navigation #{} failed: {}", generation, e);
                state.error = Some(SEARCH_ERROR_MESSAGE.to_string());
                if e.is_unauthorized() {
                    if let Some(session) = &self.session {
                        session.handle_unauthorized();
                    }
                }
            }
        }
        state.loading = false;
    }

    /// Re-runs the current location.
    pub async fn refresh(&self) {
        let location = self
            .location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        self.navigate_to(&location).await;
    }

    /// Changes the page size and reloads.
    pub async fn set_per_page(&self, per_page: u32) {
        self.per_page.store(per_page.max(1), Ordering::SeqCst);
        self.refresh().await;
    }

    /// Merges `update` into the current filters and navigates to the result.
    /// Returns the pushed location.
    pub fn update_filters(&self, update: FilterUpdate) -> String {
        let next = self.filters().apply(&update);
        self.push(&next)
    }

    pub fn change_page(&self, page: u32) -> String {
        self.update_filters(FilterUpdate::new().page(page))
    }

    /// Drops every filter but the free-text query.
    pub fn clear_filters(&self) -> String {
        let next = self.filters().cleared();
        self.push(&next)
    }

    /// Narrows results to `tag`, leaving the tags view.
    pub fn select_tag(&self, tag: &Tag) -> String {
        self.update_filters(
            FilterUpdate::new()
                .tag(tag.tag_id, Some(tag.tag_name.clone()))
                .view(ViewMode::Grid),
        )
    }

    fn push(&self, filters: &FilterState) -> String {
        let location = search::location(filters);
        self.navigator.push(&location);
        location
    }

    async fn fetch_books(&self, filters: &FilterState) -> Result<BookPage, ApiError> {
        let params = filters.api_params(self.per_page());
        match filters.search_text() {
            Some(query) => self.books.search(query, params).await,
            None => self.books.list(params).await,
        }
    }

    async fn fetch_tags(&self, filters: &FilterState) -> Result<Option<TagPage>, ApiError> {
        if filters.view != ViewMode::Tags {
            return Ok(None);
        }
        self.books
            .tags(
                PageRequest::new(filters.page, TAGS_PER_PAGE),
                SortBy::Popularity,
            )
            .await
            .map(Some)
    }
}

//! HomeLoader - Landing page listings and the search bar.

use std::sync::{Arc, PoisonError, RwLock};

use super::LoadStatus;
use crate::application::api::{BooksApi, RecommendationsApi};
use crate::application::gateway::ApiGateway;
use crate::domain::catalog::{BookSummary, PageRequest, Tag};
use crate::domain::search::{self, SortBy};
use crate::ports::Navigator;

pub const HOME_LOAD_ERROR: &str = "Failed to load content. Please try again later.";

/// Books in each of the popular and top-rated rows.
pub const HOME_LIST_LIMIT: u32 = 5;

/// Tags in the "Browse by tag" cloud.
pub const HOME_TAG_LIMIT: u32 = 12;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeState {
    pub status: LoadStatus,
    pub popular: Vec<BookSummary>,
    pub top_rated: Vec<BookSummary>,
    pub tags: Vec<Tag>,
    pub error: Option<String>,
}

pub struct HomeLoader {
    books: BooksApi,
    recommendations: RecommendationsApi,
    navigator: Arc<dyn Navigator>,
    state: RwLock<HomeState>,
}

impl HomeLoader {
    pub fn new(gateway: Arc<ApiGateway>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            books: BooksApi::new(Arc::clone(&gateway)),
            recommendations: RecommendationsApi::new(gateway),
            navigator,
            state: RwLock::new(HomeState::default()),
        }
    }

    pub fn state(&self) -> HomeState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn load(&self) {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.status = state.status.advance(LoadStatus::Loading);
            state.error = None;
        }

        let result = tokio::try_join!(
            self.books.popular(HOME_LIST_LIMIT),
            self.recommendations.popular(HOME_LIST_LIMIT, false),
            self.books
                .tags(PageRequest::first(HOME_TAG_LIMIT), SortBy::Popularity),
        );

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        match result {
            Ok((popular, top_rated, tags)) => {
                state.popular = popular;
                state.top_rated = top_rated;
                state.tags = tags.tags;
                state.status = state.status.advance(LoadStatus::Ready);
            }
            Err(e) => {
                tracing::warn!("Failed to load home page: {}", e);
                state.error = Some(HOME_LOAD_ERROR.to_string());
                state.status = state.status.advance(LoadStatus::Failed);
            }
        }
    }

    /// Submits the search bar. Blank input goes nowhere.
    pub fn search(&self, text: &str) -> Option<String> {
        let location = search::search_location(text)?;
        self.navigator.push(&location);
        Some(location)
    }
}

//! ProfileLoader - The reader's profile page.

use std::sync::{Arc, PoisonError, RwLock};

use super::{report_unauthorized, LoadStatus};
use crate::application::api::{RecommendationsApi, UsersApi};
use crate::application::gateway::ApiGateway;
use crate::application::session::SessionStore;
use crate::domain::catalog::{BookSummary, PageRequest};
use crate::domain::user::{RatedBook, UserProfile, UserStats};

pub const PROFILE_LOAD_ERROR: &str = "Failed to load profile data. Please try again later.";

/// Recent ratings and personalized picks shown on the profile.
pub const PROFILE_LIST_LIMIT: u32 = 4;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileState {
    pub status: LoadStatus,
    pub profile: Option<UserProfile>,
    pub recent_ratings: Vec<RatedBook>,
    pub recommendations: Vec<BookSummary>,
    pub stats: UserStats,
    pub error: Option<String>,
}

pub struct ProfileLoader {
    users: UsersApi,
    recommendations: RecommendationsApi,
    session: Option<Arc<SessionStore>>,
    state: RwLock<ProfileState>,
}

impl ProfileLoader {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self {
            users: UsersApi::new(Arc::clone(&gateway)),
            recommendations: RecommendationsApi::new(gateway),
            session: None,
            state: RwLock::new(ProfileState::default()),
        }
    }

    pub fn with_session(mut self, session: Arc<SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn state(&self) -> ProfileState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Loads all four sections; any failure fails the page.
    pub async fn load(&self) {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.status = state.status.advance(LoadStatus::Loading);
            state.error = None;
        }

        let result = tokio::try_join!(
            self.users.profile(),
            self.users.ratings(PageRequest::first(PROFILE_LIST_LIMIT)),
            self.recommendations.personalized(PROFILE_LIST_LIMIT),
            self.users.stats(),
        );
        if let Err(e) = &result {
            report_unauthorized(&self.session, e);
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        match result {
            Ok((profile, ratings, recommendations, stats)) => {
                state.profile = Some(profile);
                state.recent_ratings = ratings.ratings;
                state.recommendations = recommendations;
                state.stats = stats;
                state.status = state.status.advance(LoadStatus::Ready);
            }
            Err(e) => {
                tracing::warn!("Failed to load profile: {}", e);
                state.error = Some(PROFILE_LOAD_ERROR.to_string());
                state.status = state.status.advance(LoadStatus::Failed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryTokenStore, ScriptedResponse, ScriptedTransport};
    use http::{Method, StatusCode};
    use serde_json::json;

    fn loader(transport: &ScriptedTransport) -> ProfileLoader {
        ProfileLoader::new(Arc::new(ApiGateway::new(
            "http://localhost:5000/api/v1",
            Arc::new(transport.clone()),
            Arc::new(InMemoryTokenStore::with_token("t")),
        )))
    }

    fn full_transport() -> ScriptedTransport {
        ScriptedTransport::new()
            .with_route(
                Method::GET,
                "/users/profile",
                ScriptedResponse::data(json!({
                    "user_id": 1, "username": "mia",
                    "stats": {"ratings_count": 12, "to_read_count": 3}
                })),
            )
            .with_route(
                Method::GET,
                "/users/ratings",
                ScriptedResponse::data(json!({"ratings": [
                    {"book_id": 2, "title": "Emma", "rating": 5}
                ]})),
            )
            .with_route(
                Method::GET,
                "/recommendations/personalized",
                ScriptedResponse::data(json!([{"book_id": 9, "title": "Persuasion", "authors": "Jane Austen"}])),
            )
            .with_route(
                Method::GET,
                "/users/stats",
                ScriptedResponse::data(json!({"ratings_count": 12, "average_rating": 4.1})),
            )
    }

    #[tokio::test]
    async fn loads_all_sections() {
        let transport = full_transport();
        let l = loader(&transport);
        l.load().await;

        let state = l.state();
        assert_eq!(state.status, LoadStatus::Ready);
        assert_eq!(state.profile.unwrap().stats.to_read_count, 3);
        assert_eq!(state.recent_ratings.len(), 1);
        assert_eq!(state.recommendations.len(), 1);
        assert_eq!(state.stats.count("ratings_count"), Some(12));

        assert_eq!(transport.requests_to("/users/ratings")[0].param("per_page"), Some("4"));
        assert_eq!(
            transport.requests_to("/recommendations/personalized")[0].param("limit"),
            Some("4")
        );
    }

    #[tokio::test]
    async fn any_failure_fails_the_page() {
        let transport = full_transport();
        transport.replace(
            Method::GET,
            "/users/stats",
            ScriptedResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
        );
        let l = loader(&transport);
        l.load().await;

        let state = l.state();
        assert_eq!(state.status, LoadStatus::Failed);
        assert_eq!(state.error.as_deref(), Some(PROFILE_LOAD_ERROR));
    }
}

//! ReadingListManager - The reader's to-read list page.

use std::sync::{Arc, PoisonError, RwLock};

use super::{report_unauthorized, LoadStatus};
use crate::application::api::UsersApi;
use crate::application::gateway::ApiGateway;
use crate::application::notice::NoticeBoard;
use crate::application::session::SessionStore;
use crate::domain::catalog::{PageRequest, Pagination};
use crate::domain::foundation::BookId;
use crate::domain::user::ReadingListEntry;

pub const READING_LIST_LOAD_ERROR: &str = "Failed to load reading list. Please try again later.";
pub const REMOVE_SUCCESS: &str = "Book removed from reading list";
pub const REMOVE_ERROR: &str = "Failed to remove book. Please try again.";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadingListState {
    pub status: LoadStatus,
    pub entries: Vec<ReadingListEntry>,
    pub pagination: Pagination,
    pub error: Option<String>,
}

impl ReadingListState {
    pub fn is_empty(&self) -> bool {
        self.status == LoadStatus::Ready && self.entries.is_empty()
    }
}

pub struct ReadingListManager {
    users: UsersApi,
    notices: Arc<NoticeBoard>,
    session: Option<Arc<SessionStore>>,
    per_page: u32,
    state: RwLock<ReadingListState>,
}

impl ReadingListManager {
    pub fn new(gateway: Arc<ApiGateway>, notices: Arc<NoticeBoard>, per_page: u32) -> Self {
        Self {
            users: UsersApi::new(gateway),
            notices,
            session: None,
            per_page: per_page.max(1),
            state: RwLock::new(ReadingListState::default()),
        }
    }

    pub fn with_session(mut self, session: Arc<SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn state(&self) -> ReadingListState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn load(&self, page: u32) {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.status = state.status.advance(LoadStatus::Loading);
            state.error = None;
        }

        let result = self
            .users
            .reading_list(PageRequest::new(page, self.per_page))
            .await;
        if let Err(e) = &result {
            report_unauthorized(&self.session, e);
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        match result {
            Ok(list) => {
                state.entries = list.entries;
                state.pagination = list.pagination;
                state.status = state.status.advance(LoadStatus::Ready);
            }
            Err(e) => {
                tracing::warn!("Failed to load reading list: {}", e);
                state.error = Some(READING_LIST_LOAD_ERROR.to_string());
                state.status = state.status.advance(LoadStatus::Failed);
            }
        }
    }

    /// Removes `book_id` and drops it from the loaded page on success.
    pub async fn remove(&self, book_id: BookId) -> bool {
        match self.users.remove_from_reading_list(book_id).await {
            Ok(_) => {
                let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                let before = state.entries.len();
                state.entries.retain(|entry| entry.book_id != book_id);
                if state.entries.len() < before {
                    state.pagination.total = state.pagination.total.saturating_sub(1);
                    state.pagination = state.pagination.normalized();
                }
                drop(state);
                self.notices.success(REMOVE_SUCCESS);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to remove book {} from reading list: {}", book_id, e);
                report_unauthorized(&self.session, &e);
                self.notices.error(REMOVE_ERROR);
                false
            }
        }
    }

    /// Whether the loaded page holds `book_id`.
    pub fn contains(&self, book_id: BookId) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .any(|entry| entry.book_id == book_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryTokenStore, ScriptedResponse, ScriptedTransport};
    use crate::application::notice::NoticeKind;
    use http::{Method, StatusCode};
    use serde_json::json;

    fn manager(transport: &ScriptedTransport, notices: &Arc<NoticeBoard>) -> ReadingListManager {
        let gateway = Arc::new(ApiGateway::new(
            "http://localhost:5000/api/v1",
            Arc::new(transport.clone()),
            Arc::new(InMemoryTokenStore::with_token("t")),
        ));
        ReadingListManager::new(gateway, Arc::clone(notices), 20)
    }

    fn two_books() -> ScriptedResponse {
        ScriptedResponse::data(json!({
            "to_read": [
                {"book_id": 1, "title": "Emma", "added_date": "2024-01-01T00:00:00"},
                {"book_id": 2, "title": "Dune", "added_date": "2024-01-02T00:00:00"}
            ],
            "pagination": {"total": 2, "pages": 1, "current_page": 1, "per_page": 20}
        }))
    }

    #[tokio::test]
    async fn load_and_contains() {
        let transport = ScriptedTransport::new().with_route(Method::GET, "/users/to-read", two_books());
        let m = manager(&transport, &Arc::new(NoticeBoard::default()));
        m.load(1).await;

        assert_eq!(m.state().status, LoadStatus::Ready);
        assert!(m.contains(BookId::new(2)));
        assert!(!m.contains(BookId::new(3)));
    }

    #[tokio::test]
    async fn remove_drops_entry_locally() {
        let transport = ScriptedTransport::new()
            .with_route(Method::GET, "/users/to-read", two_books())
            .with_route(
                Method::DELETE,
                "/users/to-read/1",
                ScriptedResponse::message("Book removed from to-read list"),
            );
        let notices = Arc::new(NoticeBoard::default());
        let m = manager(&transport, &notices);
        m.load(1).await;

        assert!(m.remove(BookId::new(1)).await);
        let state = m.state();
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.pagination.total, 1);
        assert_eq!(notices.current().unwrap().message, REMOVE_SUCCESS);
        assert_eq!(transport.requests_to("/users/to-read").len(), 1);
    }

    #[tokio::test]
    async fn removing_last_entry_of_last_page_shrinks_page_count() {
        let transport = ScriptedTransport::new()
            .with_route(
                Method::GET,
                "/users/to-read",
                ScriptedResponse::data(json!({
                    "to_read": [{"book_id": 3, "title": "Kindred"}],
                    "pagination": {"total": 3, "pages": 2, "current_page": 2, "per_page": 2}
                })),
            )
            .with_route(
                Method::DELETE,
                "/users/to-read/3",
                ScriptedResponse::message("Book removed from to-read list"),
            );
        let m = manager(&transport, &Arc::new(NoticeBoard::default()));
        m.load(2).await;
        assert!(m.state().pagination.has_prev);

        assert!(m.remove(BookId::new(3)).await);
        let pagination = m.state().pagination;
        assert_eq!(pagination.total, 2);
        assert_eq!(pagination.pages, 1);
        assert_eq!(pagination.current_page, 1);
        assert!(!pagination.has_prev);
        assert!(!pagination.has_next);
    }

    #[tokio::test]
    async fn remove_failure_keeps_entry() {
        let transport = ScriptedTransport::new()
            .with_route(Method::GET, "/users/to-read", two_books())
            .with_route(
                Method::DELETE,
                "/users/to-read/1",
                ScriptedResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            );
        let notices = Arc::new(NoticeBoard::default());
        let m = manager(&transport, &notices);
        m.load(1).await;

        assert!(!m.remove(BookId::new(1)).await);
        assert!(m.contains(BookId::new(1)));
        let notice = notices.current().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, REMOVE_ERROR);
    }

    #[tokio::test]
    async fn load_failure_sets_error() {
        let transport = ScriptedTransport::new().with_route(
            Method::GET,
            "/users/to-read",
            ScriptedResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
        );
        let m = manager(&transport, &Arc::new(NoticeBoard::default()));
        m.load(1).await;

        let state = m.state();
        assert_eq!(state.status, LoadStatus::Failed);
        assert_eq!(state.error.as_deref(), Some(READING_LIST_LOAD_ERROR));
        assert!(!state.is_empty());
    }
}

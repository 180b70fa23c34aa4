//! BookDetailsLoader - Everything the book page shows and lets the reader do.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::{report_unauthorized, LoadStatus};
use crate::application::api::{BooksApi, UsersApi};
use crate::application::gateway::{ApiError, ApiGateway};
use crate::application::notice::NoticeBoard;
use crate::application::session::{SessionStore, LOGIN_PATH};
use crate::domain::catalog::{BookDetails, BookSummary, Review};
use crate::domain::foundation::{BookId, StarRating};
use crate::ports::Navigator;

pub const BOOK_LOAD_ERROR: &str = "Failed to load book data. Please try again later.";
pub const RATING_SUCCESS: &str = "Rating submitted successfully!";
pub const RATING_ERROR: &str = "Failed to submit rating. Please try again.";
pub const READING_LIST_ADDED: &str = "Added to reading list";
pub const READING_LIST_REMOVED: &str = "Removed from reading list";
pub const READING_LIST_ERROR: &str = "Failed to update reading list. Please try again.";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookDetailsState {
    pub status: LoadStatus,
    pub book_id: Option<BookId>,
    pub book: Option<BookDetails>,
    pub similar: Vec<BookSummary>,
    pub reviews: Vec<Review>,
    pub in_reading_list: bool,
    /// Whether the page was loaded for a signed-in reader.
    pub signed_in: bool,
    pub error: Option<String>,
}

pub struct BookDetailsLoader {
    books: BooksApi,
    users: UsersApi,
    notices: Arc<NoticeBoard>,
    navigator: Arc<dyn Navigator>,
    session: Option<Arc<SessionStore>>,
    per_page: u32,
    generation: AtomicU64,
    state: RwLock<BookDetailsState>,
}

impl BookDetailsLoader {
    pub fn new(
        gateway: Arc<ApiGateway>,
        notices: Arc<NoticeBoard>,
        navigator: Arc<dyn Navigator>,
        per_page: u32,
    ) -> Self {
        Self {
            books: BooksApi::new(Arc::clone(&gateway)),
            users: UsersApi::new(gateway),
            notices,
            navigator,
            session: None,
            per_page: per_page.max(1),
            generation: AtomicU64::new(0),
            state: RwLock::new(BookDetailsState::default()),
        }
    }

    pub fn with_session(mut self, session: Arc<SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn state(&self) -> BookDetailsState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Loads the page for `book_id`.
    ///
    /// Only the book itself is required. Similar books, reviews and the
    /// reading-list check fall back to empty when they fail.
    pub async fn load(&self, book_id: BookId, signed_in: bool) {
        let generation = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = BookDetailsState {
                status: state.status.advance(LoadStatus::Loading),
                book_id: Some(book_id),
                signed_in,
                ..BookDetailsState::default()
            };
            generation
        };

        let book = match self.books.get(book_id).await {
            Ok(book) => book,
            Err(e) => {
                report_unauthorized(&self.session, &e);
                let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                if self.is_current(generation) {
                    if e.is_not_found() {
                        tracing::info!("Book {} not found", book_id);
                        state.status = state.status.advance(LoadStatus::NotFound);
                    } else {
                        tracing::warn!("Failed to load book {}: {}", book_id, e);
                        state.status = state.status.advance(LoadStatus::Failed);
                        state.error = Some(BOOK_LOAD_ERROR.to_string());
                    }
                }
                return;
            }
        };

        let (similar, reviews, in_reading_list) = tokio::join!(
            self.books.similar(book_id),
            self.books.reviews(book_id),
            self.reading_list_membership(book_id, signed_in),
        );
        let similar = similar.unwrap_or_else(|e| {
            tracing::warn!("Failed to load books similar to {}: {}", book_id, e);
            Vec::new()
        });
        let reviews = reviews.map(|page| page.reviews).unwrap_or_else(|e| {
            tracing::warn!("Failed to load reviews of {}: {}", book_id, e);
            Vec::new()
        });

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(generation) {
            tracing::debug!("Dropping superseded load of book {}", book_id);
            return;
        }
        state.book = Some(book);
        state.similar = similar;
        state.reviews = reviews;
        state.in_reading_list = in_reading_list;
        state.status = state.status.advance(LoadStatus::Ready);
    }

    /// Rates the loaded book. Anonymous readers are sent to the login page.
    pub async fn submit_rating(&self, rating: u8, review: Option<&str>) -> bool {
        let Some(book_id) = self.actionable_book() else {
            return false;
        };
        let rating = match StarRating::new(rating) {
            Ok(rating) => rating,
            Err(e) => {
                self.notices.error(e.to_string());
                return false;
            }
        };
        let review = review.map(str::trim).filter(|r| !r.is_empty());

        match self.books.rate(book_id, rating, review).await {
            Ok(_) => {
                tracing::info!("Rated book {} with {}", book_id, rating);
                self.notices.success(RATING_SUCCESS);
                self.refresh_after_rating(book_id).await;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to rate book {}: {}", book_id, e);
                report_unauthorized(&self.session, &e);
                self.notices.error(RATING_ERROR);
                false
            }
        }
    }

    /// Adds the loaded book to the reading list, or removes it if present.
    pub async fn toggle_reading_list(&self) -> bool {
        let Some(book_id) = self.actionable_book() else {
            return false;
        };
        let in_list = self.state().in_reading_list;

        let result = if in_list {
            self.users.remove_from_reading_list(book_id).await.map(|_| ())
        } else {
            self.users.add_to_reading_list(book_id).await.map(|_| ())
        };

        match result {
            Ok(()) => {
                self.state
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .in_reading_list = !in_list;
                self.notices.success(if in_list {
                    READING_LIST_REMOVED
                } else {
                    READING_LIST_ADDED
                });
                true
            }
            Err(e) => {
                tracing::warn!("Failed to update reading list for book {}: {}", book_id, e);
                report_unauthorized(&self.session, &e);
                self.notices.error(READING_LIST_ERROR);
                false
            }
        }
    }

    /// The loaded book's id when actions are allowed. Redirects anonymous
    /// readers to the login page.
    fn actionable_book(&self) -> Option<BookId> {
        let state = self.state();
        if !state.signed_in {
            self.navigator.push(LOGIN_PATH);
            return None;
        }
        state.book.map(|book| book.book_id)
    }

    async fn reading_list_membership(&self, book_id: BookId, signed_in: bool) -> bool {
        if !signed_in {
            return false;
        }
        self.users
            .reading_list_contains(book_id, self.per_page)
            .await
            .unwrap_or_else(|e: ApiError| {
                tracing::warn!("Failed to check reading list for {}: {}", book_id, e);
                report_unauthorized(&self.session, &e);
                false
            })
    }

    /// Picks up the new average and the reader's review.
    async fn refresh_after_rating(&self, book_id: BookId) {
        let generation = self.generation.load(Ordering::SeqCst);
        let (book, reviews) = tokio::join!(self.books.get(book_id), self.books.reviews(book_id));

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(generation) {
            return;
        }
        match book {
            Ok(book) => state.book = Some(book),
            Err(e) => tracing::warn!("Failed to refresh book {}: {}", book_id, e),
        }
        match reviews {
            Ok(page) => state.reviews = page.reviews,
            Err(e) => tracing::warn!("Failed to refresh reviews of {}: {}", book_id, e),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

//! View-model loaders behind the individual pages.
//!
//! - `BookDetailsLoader` - Book page: details, similar books, reviews,
//!   rating and reading-list actions
//! - `ReadingListManager` - The reader's to-read list
//! - `ProfileLoader` - Profile, recent ratings, picks and statistics
//! - `HomeLoader` - Landing page listings and the search bar

mod book_details;
mod home;
mod load_status;
mod profile;
mod reading_list;

pub use book_details::{
    BookDetailsLoader, BookDetailsState, BOOK_LOAD_ERROR, RATING_ERROR, RATING_SUCCESS,
    READING_LIST_ADDED, READING_LIST_ERROR, READING_LIST_REMOVED,
};
pub use home::{HomeLoader, HomeState, HOME_LOAD_ERROR, HOME_LIST_LIMIT, HOME_TAG_LIMIT};
pub use load_status::LoadStatus;
pub use profile::{ProfileLoader, ProfileState, PROFILE_LIST_LIMIT, PROFILE_LOAD_ERROR};
pub use reading_list::{
    ReadingListManager, ReadingListState, READING_LIST_LOAD_ERROR, REMOVE_ERROR, REMOVE_SUCCESS,
};

use std::sync::Arc;

use crate::application::gateway::ApiError;
use crate::application::session::SessionStore;

/// Tells the session about a 401 so every view drops to anonymous.
fn report_unauthorized(session: &Option<Arc<SessionStore>>, error: &ApiError) {
    if error.is_unauthorized() {
        if let Some(session) = session {
            session.handle_unauthorized();
        }
    }
}

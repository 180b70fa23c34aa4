//! The reader's own shelves: rated books and the to-read list.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{BookSummary, Pagination};
use crate::domain::foundation::BookId;

/// A book the reader rated, from `GET /users/ratings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatedBook {
    pub book_id: BookId,
    pub title: String,
    #[serde(default)]
    pub authors: String,
    pub rating: u8,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingsPage {
    #[serde(default)]
    pub ratings: Vec<RatedBook>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// An entry of the to-read list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingListEntry {
    pub book_id: BookId,
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub added_date: Option<NaiveDateTime>,
}

impl ReadingListEntry {
    /// The entry in listing shape, for rendering with the shared book card.
    pub fn as_summary(&self) -> BookSummary {
        let mut summary = BookSummary::new(self.book_id, &self.title, &self.authors);
        summary.average_rating = self.average_rating;
        summary.image_url = self.image_url.clone();
        summary
    }
}

/// `GET /users/to-read` page; the server names the list `to_read`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingListPage {
    #[serde(rename = "to_read", default)]
    pub entries: Vec<ReadingListEntry>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// What `POST /users/to-read/{id}` echoes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingListAddition {
    pub book_id: BookId,
    #[serde(default)]
    pub title: String,
}

//! Reader reviews shown on the book details page.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Pagination;
use crate::domain::foundation::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl Review {
    /// Display name, falling back for reviews whose author was removed.
    pub fn author_label(&self) -> &str {
        self.username.as_deref().unwrap_or("Anonymous reader")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPage {
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// What `PUT /books/rate/{id}` echoes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingReceipt {
    pub rating: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_without_username_gets_placeholder() {
        let review: Review = serde_json::from_str(r#"{"rating": 4}"#).unwrap();
        assert_eq!(review.author_label(), "Anonymous reader");
    }

    #[test]
    fn review_page_without_pagination() {
        let page: ReviewPage = serde_json::from_str(
            r#"{"reviews": [{"username": "ann", "rating": 5, "review": "Loved it",
                "timestamp": "2023-11-02T08:00:00"}]}"#,
        )
        .unwrap();
        assert_eq!(page.reviews.len(), 1);
        assert_eq!(page.reviews[0].author_label(), "ann");
        assert!(page.pagination.is_none());
    }
}

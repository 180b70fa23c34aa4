//! Tags for the browse-by-tag view.

use serde::{Deserialize, Serialize};

use super::Pagination;
use crate::domain::foundation::TagId;
use crate::domain::search::{self, FilterState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub tag_id: TagId,
    pub tag_name: String,
    #[serde(default)]
    pub book_count: u64,
}

impl Tag {
    /// Search location that lists the books carrying this tag.
    pub fn search_location(&self) -> String {
        search::location(&FilterState {
            tag_id: Some(self.tag_id),
            tag_name: Some(self.tag_name.clone()).filter(|name| !name.is_empty()),
            ..FilterState::default()
        })
    }
}

/// One page of tags from `/books/tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPage {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub pagination: Pagination,
}

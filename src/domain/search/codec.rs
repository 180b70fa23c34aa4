//! URL query string <-> [`FilterState`].
//!
//! Decoding is total: anything missing or unreadable falls back to its
//! default. Encoding omits defaults so the canonical URL of a fresh search is
//! as short as possible.

use crate::domain::foundation::TagId;

use super::filter::{FilterState, MinRating, SortBy, ViewMode};

/// Path of the search results page.
pub const SEARCH_PATH: &str = "/search";

/// Parses a query string (with or without the leading `?`).
///
/// For repeated keys the first occurrence wins.
pub fn decode(query_string: &str) -> FilterState {
    let raw = query_string.strip_prefix('?').unwrap_or(query_string);
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw).unwrap_or_default();
    let get = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    };

    FilterState {
        query: get("q").map(str::to_string),
        page: get("page")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(1),
        sort_by: get("sort_by").and_then(SortBy::parse).unwrap_or_default(),
        min_rating: get("min_rating")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .and_then(|v| MinRating::from_value(v).ok())
            .unwrap_or_default(),
        tag_id: get("tag_id")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|id| *id > 0)
            .map(TagId::new),
        tag_name: get("tag_name").map(str::to_string),
        author: get("author").map(str::to_string),
        year_from: get("year_from").and_then(parse_year),
        year_to: get("year_to").and_then(parse_year),
        view: get("view").and_then(ViewMode::parse).unwrap_or_default(),
    }
}

fn parse_year(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok().filter(|y| *y > 0)
}

/// Serializes `state` without the leading `?`. The all-default state
/// encodes to the empty string.
pub fn encode(state: &FilterState) -> String {
    let mut pairs: Vec<(&'static str, String)> = Vec::new();
    if let Some(query) = &state.query {
        pairs.push(("q", query.clone()));
    }
    if state.sort_by != SortBy::default() {
        pairs.push(("sort_by", state.sort_by.as_str().to_string()));
    }
    if let Some(min_rating) = state.min_rating.as_param() {
        pairs.push(("min_rating", min_rating.to_string()));
    }
    if let Some(tag_id) = state.tag_id {
        pairs.push(("tag_id", tag_id.to_string()));
    }
    if let Some(tag_name) = &state.tag_name {
        pairs.push(("tag_name", tag_name.clone()));
    }
    if let Some(author) = &state.author {
        pairs.push(("author", author.clone()));
    }
    if let Some(year) = state.year_from {
        pairs.push(("year_from", year.to_string()));
    }
    if let Some(year) = state.year_to {
        pairs.push(("year_to", year.to_string()));
    }
    if state.view != ViewMode::default() {
        pairs.push(("view", state.view.as_str().to_string()));
    }
    if state.page > 1 {
        pairs.push(("page", state.page.to_string()));
    }
    // A sequence of string pairs always serializes.
    serde_urlencoded::to_string(&pairs).unwrap_or_default()
}

/// Full location (`/search` plus query) for `state`.
pub fn location(state: &FilterState) -> String {
    let query = encode(state);
    if query.is_empty() {
        SEARCH_PATH.to_string()
    } else {
        format!("{}?{}", SEARCH_PATH, query)
    }
}

/// Where a search-bar submission goes. Blank input goes nowhere.
pub fn search_location(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(location(&FilterState::for_query(text)))
}

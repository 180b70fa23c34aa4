//! Search domain module.
//!
//! The search page is driven entirely by its URL: [`codec`] maps the query
//! string to a [`FilterState`] and back.

pub mod codec;
mod filter;

pub use codec::{decode, encode, location, search_location, SEARCH_PATH};
pub use filter::{
    ActiveFilter, FilterKind, FilterState, FilterUpdate, MinRating, SortBy, ViewMode,
};

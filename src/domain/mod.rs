//! Domain layer containing the client's data model.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, star ratings, errors, state machine)
//! - `catalog` - Books, tags, reviews and pagination
//! - `search` - Search filter state and its URL codec
//! - `session` - Authentication status and user records
//! - `user` - Profile, shelves and reading statistics

pub mod catalog;
pub mod foundation;
pub mod search;
pub mod session;
pub mod user;

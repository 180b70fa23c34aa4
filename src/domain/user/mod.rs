//! User domain module.
//!
//! The signed-in reader's profile, shelves (ratings and to-read list),
//! statistics and activity feed.

mod library;
mod profile;
mod stats;

pub use library::{RatedBook, RatingsPage, ReadingListAddition, ReadingListEntry, ReadingListPage};
pub use profile::{ProfileStats, ProfileUpdate, UserProfile};
pub use stats::{ActivityEntry, UserStats};

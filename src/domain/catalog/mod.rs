//! Catalog domain module.
//!
//! Books, tags, reviews and the pagination metadata that accompanies every
//! paged listing.

mod book;
mod pagination;
mod review;
mod tag;

pub use book::{BookDetails, BookPage, BookSummary, BookTag, RatingsDistribution};
pub use pagination::{PageRequest, Pagination};
pub use review::{RatingReceipt, Review, ReviewPage};
pub use tag::{Tag, TagPage};

//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, value objects, the state machine trait and the
//! validation error type that the rest of the client builds on.

mod errors;
mod ids;
mod star_rating;
mod state_machine;

pub use errors::ValidationError;
pub use ids::{BookId, TagId, UserId};
pub use star_rating::StarRating;
pub use state_machine::StateMachine;

//! Authentication session: the process-wide store and the route guard that
//! reads it.

mod guard;
mod store;

pub use guard::{RouteDecision, RouteGuard, LOGIN_PATH};
pub use store::{SessionSnapshot, SessionStore};

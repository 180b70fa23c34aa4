//! Session domain module.
//!
//! The authentication session's lifecycle status and the user/credential
//! records exchanged with the auth endpoints.

mod status;
mod user;

pub use status::SessionStatus;
pub use user::{AuthGrant, Credentials, RegisterRequest, UserRecord};

//! Typed API services, one method per REST endpoint.
//!
//! - `AuthApi` - `/auth/*`
//! - `BooksApi` - `/books/*`
//! - `UsersApi` - `/users/*`
//! - `RecommendationsApi` - `/recommendations/*`

mod auth;
mod books;
mod recommendations;
mod users;

pub use auth::AuthApi;
pub use books::BooksApi;
pub use recommendations::RecommendationsApi;
pub use users::UsersApi;

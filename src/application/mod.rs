//! Application layer - Gateway, API services, stores and page loaders.
//!
//! This layer orchestrates domain types and coordinates between ports.
//! Views read snapshots from the stores and loaders here and call their
//! operations; nothing in this layer renders anything.

pub mod api;
pub mod gateway;
pub mod notice;
pub mod pages;
pub mod search;
pub mod session;

pub use api::{AuthApi, BooksApi, RecommendationsApi, UsersApi};
pub use gateway::{ApiError, ApiGateway, RequestOptions};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use pages::{BookDetailsLoader, HomeLoader, LoadStatus, ProfileLoader, ReadingListManager};
pub use search::{SearchController, SearchViewState};
pub use session::{RouteDecision, RouteGuard, SessionSnapshot, SessionStore};

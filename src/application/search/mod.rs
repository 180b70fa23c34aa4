//! URL-driven search page: the controller that fetches on navigation and
//! the view state it publishes.

mod controller;
mod view_state;

pub use controller::{SearchController, SEARCH_ERROR_MESSAGE, TAGS_PER_PAGE};
pub use view_state::SearchViewState;

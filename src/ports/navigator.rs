//! Navigator Port - Interface to the router's history.

/// Port for changing the current location.
///
/// The router answers a push by handing the new query string back to
/// whichever controller renders that path.
pub trait Navigator: Send + Sync {
    /// Pushes `location` (path plus optional `?query`).
    fn push(&self, location: &str);
}

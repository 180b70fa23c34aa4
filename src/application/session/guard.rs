//! RouteGuard - Gatekeeping for pages that need a signed-in reader.

use super::SessionSnapshot;
use crate::ports::Navigator;

pub const LOGIN_PATH: &str = "/login";

/// What a protected page should do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the page.
    Allow,
    /// The session is still being restored or exchanged; show a spinner.
    Wait,
    /// Send the reader to the login page.
    RedirectToLogin,
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn check(snapshot: &SessionSnapshot) -> RouteDecision {
        if snapshot.is_loading() {
            RouteDecision::Wait
        } else if snapshot.is_authenticated() {
            RouteDecision::Allow
        } else {
            RouteDecision::RedirectToLogin
        }
    }

    /// [`RouteGuard::check`], performing the redirect through `navigator`.
    pub fn enforce(snapshot: &SessionSnapshot, navigator: &dyn Navigator) -> RouteDecision {
        let decision = Self::check(snapshot);
        if decision == RouteDecision::RedirectToLogin {
            navigator.push(LOGIN_PATH);
        }
        decision
    }
}

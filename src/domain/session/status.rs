//! SessionStatus enum for the authentication session lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where the client's authentication session currently stands.
///
/// `Checking` covers both the startup restore and an in-flight
/// login/register call; it is the only status in which the session is
/// considered loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Anonymous,
    Checking,
    Authenticated,
    Error,
}

impl SessionStatus {
    /// Returns true while a restore or credential exchange is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Checking)
    }

    /// Returns true if a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated)
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (Anonymous, Checking)
                | (Checking, Authenticated)
                | (Checking, Anonymous)
                | (Checking, Error)
                | (Authenticated, Checking)
                | (Authenticated, Anonymous)
                | (Error, Checking)
                | (Error, Anonymous)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Anonymous => vec![Checking],
            Checking => vec![Authenticated, Anonymous, Error],
            Authenticated => vec![Checking, Anonymous],
            Error => vec![Checking, Anonymous],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Anonymous => "Anonymous",
            SessionStatus::Checking => "Checking",
            SessionStatus::Authenticated => "Authenticated",
            SessionStatus::Error => "Error",
        };
        write!(f, "{}", s)
    }
}

//! LoadStatus - Lifecycle of a page load.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The server says the thing the page is about does not exist.
    NotFound,
    Failed,
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    /// Moves to `target`, logging edges the state machine does not list.
    pub fn advance(self, target: LoadStatus) -> LoadStatus {
        self.transition_to(target).unwrap_or_else(|e| {
            tracing::warn!("Unexpected load transition {:?} -> {:?}: {}", self, target, e);
            target
        })
    }
}

impl StateMachine for LoadStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use LoadStatus::*;
        matches!(
            (self, target),
            (Idle, Loading)
                | (Loading, Ready)
                | (Loading, NotFound)
                | (Loading, Failed)
                | (Loading, Loading)
                | (Ready, Loading)
                | (NotFound, Loading)
                | (Failed, Loading)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use LoadStatus::*;
        match self {
            Idle => vec![Loading],
            Loading => vec![Loading, Ready, NotFound, Failed],
            Ready | NotFound | Failed => vec![Loading],
        }
    }
}

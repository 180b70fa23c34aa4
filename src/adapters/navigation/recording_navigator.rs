//! Navigator that only remembers where it was sent.
//!
//! Stands in for a router in tests and in the command-line front end, which
//! replays pushed locations itself.

use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::Navigator;

#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    history: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pushed location, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, location: &str) {
        tracing::debug!("Navigating to {}", location);
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location.to_string());
    }
}

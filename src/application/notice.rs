//! Transient success/error banners.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::config::NoticeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Holds at most one notice, which disappears `clear_after` after it was
/// posted. A newer notice replaces an older one and restarts the clock.
#[derive(Debug)]
pub struct NoticeBoard {
    clear_after: Duration,
    current: Mutex<Option<(Notice, Instant)>>,
}

impl NoticeBoard {
    pub fn new(clear_after: Duration) -> Self {
        Self {
            clear_after,
            current: Mutex::new(None),
        }
    }

    pub fn from_config(config: &NoticeConfig) -> Self {
        Self::new(config.clear_after())
    }

    pub fn success(&self, message: impl Into<String>) {
        self.post(NoticeKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.post(NoticeKind::Error, message.into());
    }

    /// The live notice, if it has not expired yet.
    pub fn current(&self) -> Option<Notice> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        match current.as_ref() {
            Some((_, posted)) if posted.elapsed() >= self.clear_after => {
                *current = None;
                None
            }
            Some((notice, _)) => Some(notice.clone()),
            None => None,
        }
    }

    pub fn dismiss(&self) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn post(&self, kind: NoticeKind, message: String) {
        tracing::debug!("Notice ({:?}): {}", kind, message);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((Notice { kind, message }, Instant::now()));
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::from_config(&NoticeConfig::default())
    }
}

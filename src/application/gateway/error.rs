//! Error taxonomy for API calls.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::TransportError;

/// Errors surfaced by [`super::ApiGateway`].
///
/// Variants that come from a server answer carry its `message`, when it sent
/// one, so views can show it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never got an HTTP answer.
    #[error("Network error: {0}")]
    Network(#[from] TransportError),

    /// 401; the rejected token has already been evicted.
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("no message"))]
    Unauthorized { message: Option<String> },

    #[error("Not found: {}", .message.as_deref().unwrap_or("no message"))]
    NotFound { message: Option<String> },

    /// Any other non-2xx status.
    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// The body was not the JSON shape the caller expected.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Caught before sending.
    #[error("Invalid request: {0}")]
    Invalid(#[from] ValidationError),

    /// A 2xx answer whose envelope says `success: false`.
    #[error("Request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },
}

impl ApiError {
    pub fn decode(message: impl Into<String>) -> Self {
        ApiError::Decode(message.into())
    }

    /// The server's message if it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let ApiError::Invalid(e) = self {
            return e.to_string();
        }
        self.server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::NotFound { message }
            | ApiError::Status { message, .. }
            | ApiError::Rejected { message } => message.as_deref(),
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::Invalid(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// HTTP status of the answer, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_message() {
        let err = ApiError::Unauthorized {
            message: Some("Invalid username or password".to_string()),
        };
        assert_eq!(err.user_message("Login failed"), "Invalid username or password");
    }

    #[test]
    fn user_message_falls_back() {
        let err = ApiError::Network(TransportError::Connect("refused".to_string()));
        assert_eq!(err.user_message("Login failed"), "Login failed");

        let blank = ApiError::Status {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(blank.user_message("Registration failed"), "Registration failed");
    }

    #[test]
    fn validation_failures_explain_themselves() {
        let err = ApiError::from(ValidationError::empty_field("username"));
        assert_eq!(err.user_message("fallback"), "Field 'username' cannot be empty");
    }

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::NotFound { message: None }.status(), Some(404));
        assert_eq!(ApiError::decode("bad").status(), None);
        assert!(ApiError::NotFound { message: None }.is_not_found());
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = ApiError::Status {
            status: 409,
            message: Some("Book already in to-read list".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status 409: Book already in to-read list"
        );
    }
}

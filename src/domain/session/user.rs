//! User records and credential payloads exchanged with the auth endpoints.

use chrono::NaiveDateTime;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{UserId, ValidationError};

/// The signed-in user as reported by `/auth/me`, `/auth/login` and
/// `/auth/register`.
///
/// Login and register only return `user_id` and `username`; the remaining
/// fields are filled by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub joined_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl UserRecord {
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            email: None,
            joined_date: None,
            profile_image: None,
        }
    }
}

/// Username/password pair sent to `/auth/login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration payload sent to `/auth/register`.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks the fields the server insists on before making a round trip.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !self.email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A successful login or registration: the bearer token plus the user.
pub struct AuthGrant {
    pub token: SecretString,
    pub user: UserRecord,
}

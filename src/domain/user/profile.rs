//! The signed-in reader's profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::session::UserRecord;

/// Counters shown on the profile header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    #[serde(default)]
    pub ratings_count: u64,
    #[serde(default)]
    pub to_read_count: u64,
}

/// `GET /users/profile`: the user record plus headline counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: UserRecord,
    #[serde(default)]
    pub stats: ProfileStats,
}

/// Partial update sent to `PUT /users/profile`. Absent fields are left
/// untouched by the server.
#[derive(Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_profile_image(mut self, url: impl Into<String>) -> Self {
        self.profile_image = Some(url.into());
        self
    }

    /// A password change only goes through together with the current password.
    pub fn with_password_change(
        mut self,
        current_password: impl Into<String>,
        new_password: impl Into<String>,
    ) -> Self {
        self.current_password = Some(current_password.into());
        self.password = Some(new_password.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.profile_image.is_none()
            && self.password.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::empty_field("profile_update"));
        }
        if let Some(username) = &self.username {
            if username.trim().is_empty() {
                return Err(ValidationError::empty_field("username"));
            }
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(ValidationError::invalid_format("email", "missing @ symbol"));
            }
        }
        if self.password.is_some() && self.current_password.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::empty_field("current_password"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("profile_image", &self.profile_image)
            .field("password_change", &self.password.is_some())
            .finish()
    }
}

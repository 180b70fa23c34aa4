//! AuthApi - Login, registration and current-user lookup.

use http::Method;
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;

use crate::application::gateway::{ApiError, ApiGateway, RequestOptions};
use crate::domain::session::{AuthGrant, Credentials, RegisterRequest, UserRecord};

/// `{token, user_id, username, ...}` as login and register return it.
#[derive(Deserialize)]
struct GrantWire {
    token: String,
    #[serde(flatten)]
    user: UserRecord,
}

impl From<GrantWire> for AuthGrant {
    fn from(wire: GrantWire) -> Self {
        AuthGrant {
            token: SecretString::new(wire.token),
            user: wire.user,
        }
    }
}

pub struct AuthApi {
    gateway: Arc<ApiGateway>,
}

impl AuthApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// The user the stored token belongs to.
    pub async fn me(&self) -> Result<UserRecord, ApiError> {
        self.gateway
            .fetch(Method::GET, "/auth/me", RequestOptions::new())
            .await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, ApiError> {
        let options = RequestOptions::new().json(credentials)?;
        let grant: GrantWire = self
            .gateway
            .fetch(Method::POST, "/auth/login", options)
            .await?;
        Ok(grant.into())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthGrant, ApiError> {
        let options = RequestOptions::new().json(request)?;
        let grant: GrantWire = self
            .gateway
            .fetch(Method::POST, "/auth/register", options)
            .await?;
        Ok(grant.into())
    }
}

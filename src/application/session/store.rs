//! SessionStore - Who is signed in, and the calls that change it.

use secrecy::SecretString;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::application::api::AuthApi;
use crate::application::gateway::{ApiError, ApiGateway};
use crate::domain::foundation::StateMachine;
use crate::domain::session::{AuthGrant, Credentials, RegisterRequest, SessionStatus, UserRecord};
use crate::ports::TokenStore;

const LOGIN_FALLBACK: &str = "Login failed";
const REGISTER_FALLBACK: &str = "Registration failed";

/// Read-only view of the session handed to views.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub user: Option<UserRecord>,
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn current_user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }
}

/// Owns the authentication session.
///
/// Every operation that starts an exchange with the server takes a new
/// epoch; an answer is applied only if no later operation has started since,
/// so a slow `/auth/me` cannot overwrite a fresh login or a logout.
///
/// Operations never fail to the caller: failures land in the snapshot's
/// `error` (login/register) or simply leave the session anonymous (restore).
pub struct SessionStore {
    auth: AuthApi,
    tokens: Arc<dyn TokenStore>,
    state: RwLock<SessionSnapshot>,
    epoch: AtomicU64,
    // Epoch of the login/register in flight, 0 when none.
    exchange: AtomicU64,
}

impl SessionStore {
    /// A store in `Checking` state; call [`SessionStore::restore`] next.
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        let tokens = Arc::clone(gateway.tokens());
        Self {
            auth: AuthApi::new(gateway),
            tokens,
            state: RwLock::new(SessionSnapshot {
                status: SessionStatus::Checking,
                user: None,
                error: None,
            }),
            epoch: AtomicU64::new(0),
            exchange: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .status
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    pub fn current_user(&self) -> Option<UserRecord> {
        self.snapshot().user
    }

    pub fn error(&self) -> Option<String> {
        self.snapshot().error
    }

    /// Restores the session from the persisted token.
    ///
    /// Without a token no request is made. A token the server does not
    /// accept, for whatever reason, is deleted.
    pub async fn restore(&self) {
        let epoch = self.begin();
        let token = match self.tokens.load().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read stored token: {}", e);
                None
            }
        };

        let Some(token) = token else {
            tracing::debug!("No stored token, starting anonymous");
            self.apply(epoch, SessionStatus::Anonymous, None, None);
            return;
        };

        self.apply(epoch, SessionStatus::Checking, None, None);
        match self.auth.me().await {
            Ok(user) => {
                tracing::info!("Restored session for {}", user.username);
                self.apply(epoch, SessionStatus::Authenticated, Some(user), None);
            }
            Err(e) => {
                tracing::warn!("Stored token rejected, discarding it: {}", e);
                self.discard(&token).await;
                self.apply(epoch, SessionStatus::Anonymous, None, None);
            }
        }
    }

    /// Signs in. Returns whether the session is now authenticated as the
    /// given user.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let epoch = self.begin_exchange();
        self.apply(epoch, SessionStatus::Checking, None, None);

        let result = self.auth.login(&Credentials::new(username, password)).await;
        self.finish_exchange(epoch, result, LOGIN_FALLBACK).await
    }

    /// Creates an account and signs in with it.
    pub async fn register(&self, request: RegisterRequest) -> bool {
        let epoch = self.begin_exchange();
        self.apply(epoch, SessionStatus::Checking, None, None);

        let result = match request.validate() {
            Ok(()) => self.auth.register(&request).await,
            Err(e) => Err(ApiError::Invalid(e)),
        };
        self.finish_exchange(epoch, result, REGISTER_FALLBACK).await
    }

    /// Signs out locally. No request is made.
    pub async fn logout(&self) {
        let epoch = self.begin();
        self.apply(epoch, SessionStatus::Anonymous, None, None);
        if let Err(e) = self.tokens.remove().await {
            tracing::warn!("Failed to delete stored token on logout: {}", e);
        }
        tracing::info!("Logged out");
    }

    /// Resets to anonymous after some call came back 401. The gateway has
    /// already evicted the token.
    ///
    /// A login or register in flight is left alone: the 401 belongs to the
    /// token it is about to replace.
    pub fn handle_unauthorized(&self) {
        let exchange = self.exchange.load(Ordering::SeqCst);
        if exchange != 0 && exchange == self.epoch.load(Ordering::SeqCst) {
            tracing::debug!("Ignoring 401 reported during a sign-in exchange");
            return;
        }
        let epoch = self.begin();
        if self.status() != SessionStatus::Anonymous {
            tracing::warn!("Session rejected by the server, signing out");
        }
        self.apply(epoch, SessionStatus::Anonymous, None, None);
    }

    async fn finish_exchange(
        &self,
        epoch: u64,
        result: Result<AuthGrant, ApiError>,
        fallback: &str,
    ) -> bool {
        let applied = self.apply_exchange(epoch, result, fallback).await;
        let _ = self
            .exchange
            .compare_exchange(epoch, 0, Ordering::SeqCst, Ordering::SeqCst);
        applied
    }

    async fn apply_exchange(
        &self,
        epoch: u64,
        result: Result<AuthGrant, ApiError>,
        fallback: &str,
    ) -> bool {
        match result {
            Ok(grant) => {
                if !self.is_current(epoch) {
                    tracing::debug!("Discarding superseded sign-in for {}", grant.user.username);
                    return false;
                }
                if let Err(e) = self.tokens.store(&grant.token).await {
                    tracing::error!("Failed to persist token: {}", e);
                    self.apply(
                        epoch,
                        SessionStatus::Error,
                        None,
                        Some(fallback.to_string()),
                    );
                    return false;
                }
                tracing::info!("Signed in as {}", grant.user.username);
                self.apply(epoch, SessionStatus::Authenticated, Some(grant.user), None)
            }
            Err(e) => {
                tracing::warn!("{}: {}", fallback, e);
                self.apply(
                    epoch,
                    SessionStatus::Error,
                    None,
                    Some(e.user_message(fallback)),
                );
                false
            }
        }
    }

    async fn discard(&self, token: &SecretString) {
        if let Err(e) = self.tokens.evict(token).await {
            tracing::warn!("Failed to delete rejected token: {}", e);
        }
    }

    fn begin(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn begin_exchange(&self) -> u64 {
        let epoch = self.begin();
        self.exchange.store(epoch, Ordering::SeqCst);
        epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == epoch
    }

    /// Writes the new state if `epoch` is still current. Returns whether it
    /// was applied.
    fn apply(
        &self,
        epoch: u64,
        status: SessionStatus,
        user: Option<UserRecord>,
        error: Option<String>,
    ) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(epoch) {
            return false;
        }
        if state.status != status && !state.status.can_transition_to(&status) {
            tracing::warn!(
                "Unexpected session transition {} -> {}",
                state.status,
                status
            );
        }
        *state = SessionSnapshot {
            status,
            user,
            error,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryTokenStore, ScriptedResponse, ScriptedTransport};
    use http::{Method, StatusCode};
    use serde_json::json;
    use std::time::Duration;

    fn store_with(transport: &ScriptedTransport, tokens: &InMemoryTokenStore) -> SessionStore {
        SessionStore::new(Arc::new(ApiGateway::new(
            "http://localhost:5000/api/v1",
            Arc::new(transport.clone()),
            Arc::new(tokens.clone()),
        )))
    }

    fn me_ok() -> ScriptedResponse {
        ScriptedResponse::data(json!({"user_id": 1, "username": "mia", "email": "mia@example.org"}))
    }

    #[tokio::test]
    async fn starts_loading() {
        let store = store_with(&ScriptedTransport::new(), &InMemoryTokenStore::new());
        assert!(store.snapshot().is_loading());
    }

    #[tokio::test]
    async fn restore_without_token_makes_no_request() {
        let transport = ScriptedTransport::new();
        let store = store_with(&transport, &InMemoryTokenStore::new());
        store.restore().await;

        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, SessionStatus::Anonymous);
        assert!(!snapshot.is_loading());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn restore_with_valid_token_authenticates() {
        let transport =
            ScriptedTransport::new().with_route(Method::GET, "/auth/me", me_ok());
        let store = store_with(&transport, &InMemoryTokenStore::with_token("good"));
        store.restore().await;

        assert!(store.is_authenticated());
        assert_eq!(store.current_user().unwrap().username, "mia");
    }

    #[tokio::test]
    async fn restore_failure_other_than_401_still_discards_token() {
        let transport = ScriptedTransport::new().with_route(
            Method::GET,
            "/auth/me",
            ScriptedResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
        );
        let tokens = InMemoryTokenStore::with_token("t");
        let store = store_with(&transport, &tokens);
        store.restore().await;

        assert_eq!(store.status(), SessionStatus::Anonymous);
        assert_eq!(tokens.peek().await, None);
    }

    #[tokio::test]
    async fn login_persists_token_and_sets_user() {
        let transport = ScriptedTransport::new().with_route(
            Method::POST,
            "/auth/login",
            ScriptedResponse::data(json!({"user_id": 1, "username": "mia", "token": "jwt"})),
        );
        let tokens = InMemoryTokenStore::new();
        let store = store_with(&transport, &tokens);
        store.restore().await;

        assert!(store.login("mia", "pw").await);
        assert!(store.is_authenticated());
        assert_eq!(store.error(), None);
        assert_eq!(tokens.peek().await.as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn login_failure_reports_server_message() {
        let transport = ScriptedTransport::new().with_route(
            Method::POST,
            "/auth/login",
            ScriptedResponse::error(StatusCode::UNAUTHORIZED, "Invalid username or password"),
        );
        let store = store_with(&transport, &InMemoryTokenStore::new());
        store.restore().await;

        assert!(!store.login("mia", "wrong").await);
        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, SessionStatus::Error);
        assert!(!snapshot.is_authenticated());
        assert_eq!(snapshot.error.as_deref(), Some("Invalid username or password"));
    }

    #[tokio::test]
    async fn login_failure_without_message_uses_fallback() {
        let transport = ScriptedTransport::new().with_route(
            Method::POST,
            "/auth/login",
            ScriptedResponse::raw(StatusCode::BAD_GATEWAY, ""),
        );
        let store = store_with(&transport, &InMemoryTokenStore::new());
        assert!(!store.login("mia", "pw").await);
        assert_eq!(store.error().as_deref(), Some("Login failed"));
    }

    #[tokio::test]
    async fn next_login_clears_previous_error() {
        let transport = ScriptedTransport::new()
            .with_route(
                Method::POST,
                "/auth/login",
                ScriptedResponse::error(StatusCode::UNAUTHORIZED, "Invalid username or password"),
            )
            .with_route(
                Method::POST,
                "/auth/login",
                ScriptedResponse::data(json!({"user_id": 1, "username": "mia", "token": "jwt"})),
            );
        let store = store_with(&transport, &InMemoryTokenStore::new());
        assert!(!store.login("mia", "wrong").await);
        assert!(store.login("mia", "right").await);
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn register_validates_before_sending() {
        let transport = ScriptedTransport::new();
        let store = store_with(&transport, &InMemoryTokenStore::new());
        assert!(!store.register(RegisterRequest::new("mia", "not-an-email", "pw")).await);
        assert_eq!(transport.request_count(), 0);
        assert!(store.error().unwrap().contains("email"));
    }

    #[tokio::test]
    async fn register_failure_falls_back() {
        let transport = ScriptedTransport::new().with_route(
            Method::POST,
            "/auth/register",
            ScriptedResponse::raw(StatusCode::INTERNAL_SERVER_ERROR, "oops"),
        );
        let store = store_with(&transport, &InMemoryTokenStore::new());
        assert!(!store.register(RegisterRequest::new("mia", "m@x.org", "pw")).await);
        assert_eq!(store.error().as_deref(), Some("Registration failed"));
    }

    #[tokio::test]
    async fn logout_clears_user_and_token() {
        let transport =
            ScriptedTransport::new().with_route(Method::GET, "/auth/me", me_ok());
        let tokens = InMemoryTokenStore::with_token("good");
        let store = store_with(&transport, &tokens);
        store.restore().await;

        store.logout().await;
        assert!(!store.is_authenticated());
        assert_eq!(store.current_user(), None);
        assert_eq!(tokens.peek().await, None);
        store.logout().await;
        assert_eq!(store.status(), SessionStatus::Anonymous);
    }

    #[tokio::test]
    async fn logout_wins_over_slow_restore() {
        let transport = ScriptedTransport::new().with_route(
            Method::GET,
            "/auth/me",
            me_ok().with_delay(Duration::from_millis(50)),
        );
        let store = Arc::new(store_with(&transport, &InMemoryTokenStore::with_token("t")));

        let restoring = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.restore().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        store.logout().await;
        restoring.await.unwrap();

        assert_eq!(store.status(), SessionStatus::Anonymous);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn handle_unauthorized_resets_session() {
        let transport =
            ScriptedTransport::new().with_route(Method::GET, "/auth/me", me_ok());
        let store = store_with(&transport, &InMemoryTokenStore::with_token("t"));
        store.restore().await;

        store.handle_unauthorized();
        assert_eq!(store.status(), SessionStatus::Anonymous);
        assert_eq!(store.current_user(), None);
    }

    #[tokio::test]
    async fn late_unauthorized_does_not_cancel_login_in_flight() {
        let transport = ScriptedTransport::new().with_route(
            Method::POST,
            "/auth/login",
            ScriptedResponse::data(json!({"user_id": 1, "username": "mia", "token": "jwt"}))
                .with_delay(Duration::from_millis(50)),
        );
        let tokens = InMemoryTokenStore::new();
        let store = Arc::new(store_with(&transport, &tokens));

        let logging_in = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.login("mia", "pw").await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        store.handle_unauthorized();

        assert!(logging_in.await.unwrap());
        assert!(store.is_authenticated());
        assert_eq!(store.error(), None);
        assert_eq!(tokens.peek().await.as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn unauthorized_after_login_still_signs_out() {
        let transport = ScriptedTransport::new().with_route(
            Method::POST,
            "/auth/login",
            ScriptedResponse::data(json!({"user_id": 1, "username": "mia", "token": "jwt"})),
        );
        let store = store_with(&transport, &InMemoryTokenStore::new());
        assert!(store.login("mia", "pw").await);

        store.handle_unauthorized();
        assert_eq!(store.status(), SessionStatus::Anonymous);
    }
}

//! Authentication state container.
//!
//! Holds the current user and access token, wraps the auth endpoints with
//! busy/error bookkeeping, and keeps the token slot of the shared
//! [`ApiClient`] and the persisted session file in sync with every
//! transition. On construction a persisted token is restored, so a prior
//! session picks up where it left off.

use std::sync::Arc;

use petcare_client::{ApiClient, User};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::token::TokenFile;

#[derive(Debug, Default)]
struct AuthState {
    user: Option<User>,
    token: Option<String>,
    loading: bool,
    error: Option<String>,
}

/// State container for the user session.
#[derive(Clone)]
pub struct AuthStore {
    client: ApiClient,
    tokens: TokenFile,
    state: Arc<RwLock<AuthState>>,
}

impl AuthStore {
    /// Create the store, restoring any persisted session token into both
    /// the local state and the client's shared token slot.
    pub fn new(client: ApiClient, tokens: TokenFile) -> Self {
        let mut state = AuthState::default();
        if let Some(token) = tokens.load() {
            client.set_token(&token);
            state.token = Some(token);
            debug!("persisted session restored");
        }

        Self {
            client,
            tokens,
            state: Arc::new(RwLock::new(state)),
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Register a new account and start a session with it.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> StoreResult<User> {
        self.begin().await;
        let result = self.client.register(username, email, password).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(auth) => {
                self.client.set_token(&auth.access_token);
                if let Err(err) = self.tokens.save(&auth.access_token) {
                    warn!(%err, "failed to persist session token");
                }
                state.token = Some(auth.access_token);
                state.user = Some(auth.user.clone());
                info!(username = %auth.user.username, "registered and signed in");
                Ok(auth.user)
            }
            Err(err) => {
                state.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Log in and start a session.
    pub async fn login(&self, username: &str, password: &str) -> StoreResult<User> {
        self.begin().await;
        let result = self.client.login(username, password).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(auth) => {
                self.client.set_token(&auth.access_token);
                if let Err(err) = self.tokens.save(&auth.access_token) {
                    warn!(%err, "failed to persist session token");
                }
                state.token = Some(auth.access_token);
                state.user = Some(auth.user.clone());
                info!(username = %auth.user.username, "signed in");
                Ok(auth.user)
            }
            Err(err) => {
                state.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Refresh the current user from the server.
    ///
    /// A token the server no longer accepts means the session is dead, so
    /// any failure here logs the user out before surfacing the error.
    pub async fn fetch_user(&self) -> StoreResult<User> {
        self.begin().await;
        let result = self.client.current_user().await;

        match result {
            Ok(user) => {
                let mut state = self.state.write().await;
                state.loading = false;
                state.user = Some(user.clone());
                Ok(user)
            }
            Err(err) => {
                self.logout().await;
                let mut state = self.state.write().await;
                state.loading = false;
                state.error = Some(err.to_string());
                warn!(%err, "session check failed, signed out");
                Err(err.into())
            }
        }
    }

    /// End the session: clear user, token, the client's token slot, and
    /// the persisted session file.
    pub async fn logout(&self) {
        self.client.clear_token();
        if let Err(err) = self.tokens.clear() {
            warn!(%err, "failed to remove persisted session token");
        }

        let mut state = self.state.write().await;
        state.user = None;
        state.token = None;
        debug!("signed out");
    }

    /// Clear the error slot.
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// The signed-in user, if known.
    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// The session token, if one is held.
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    /// Whether a session token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.token.is_some()
    }

    /// Whether an action is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Message of the most recent failure, if any.
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }
}

// ── tests ────────────────────────────────────────────────────────────

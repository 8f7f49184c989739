//! Session lifecycle: Anonymous <-> Authenticated.
//!
//! The token is an opaque bearer credential owned by [`SessionManager`] and
//! mirrored into a persisted [`TokenStore`]. There is no "present but
//! expired" state: an invalid token is only discovered when a later request
//! fails, and that failure does not force a transition back to Anonymous.

use std::sync::Arc;

use super::token_store::TokenStore;
use crate::status::StatusChannel;
use crate::transport::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Login,
    Register,
}

/// Authentication state value. Replaced wholesale, never partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    fn with_token(token: String) -> Self {
        Self { token: Some(token) }
    }

    pub fn authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

pub struct SessionManager {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    status: StatusChannel,
    session: Session,
}

impl SessionManager {
    /// Builds the manager, seeding the session from the persisted store. An
    /// unreadable store starts the session Anonymous rather than failing.
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>, status: StatusChannel) -> Self {
        let session = match store.get() {
            Ok(Some(token)) => Session::with_token(token),
            Ok(None) => Session::default(),
            Err(err) => {
                tracing::warn!(target: "noted.session", "token store unreadable: {err}");
                Session::default()
            }
        };
        Self {
            client,
            store,
            status,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Token accessor for request issuers.
    pub fn current_token(&self) -> Option<&str> {
        self.session.token()
    }

    /// Submit credentials to the remote authority. On success the returned
    /// token replaces the session and is persisted; on failure the session
    /// is left exactly as it was and the error message lands in the status
    /// slot. No retry.
    pub async fn authenticate(&mut self, kind: AuthKind, email: &str, password: &str) -> Session {
        let result = match kind {
            AuthKind::Login => self.client.login(email, password).await,
            AuthKind::Register => self.client.register(email, password).await,
        };

        match result {
            Ok(tok) => {
                if let Err(err) = self.store.set(&tok.access_token) {
                    tracing::warn!(target: "noted.session", "failed to persist token: {err}");
                }
                self.session = Session::with_token(tok.access_token);
                let message = match kind {
                    AuthKind::Login => "logged in",
                    AuthKind::Register => "account created",
                };
                self.status.set(message);
            }
            Err(err) => {
                tracing::debug!(target: "noted.session", "authenticate failed: {err}");
                self.status.set(err.to_string());
            }
        }
        self.session.clone()
    }

    /// Clear the in-memory and persisted token. Purely local; always leaves
    /// the session Anonymous.
    pub fn logout(&mut self) -> Session {
        if let Err(err) = self.store.remove() {
            tracing::warn!(target: "noted.session", "failed to clear persisted token: {err}");
        }
        self.session = Session::default();
        self.status.set("logged out");
        self.session.clone()
    }
}

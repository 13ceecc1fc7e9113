//! The auth provider seam and its environment-credential realization.
//!
//! The service treats authentication as an external collaborator: sign
//! in, sign out, look up the current session, and subscribe to session
//! changes. [`EnvAuthProvider`] realizes the seam with the single admin
//! credential pair from configuration and in-memory bearer sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::{RwLock, broadcast};

use super::session::{Session, SessionChange, SessionToken};
use crate::error::ApiError;

/// Capacity of the session-change notification channel.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// External auth collaborator.
#[async_trait]
pub trait AuthProvider: Send + Sync + std::fmt::Debug {
    /// Establishes a session for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] with a displayable message when the
    /// credentials are rejected.
    async fn sign_in(&self, email: &str, secret: &str) -> Result<Session, ApiError>;

    /// Ends the session behind `token`. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] only on provider failure, never for an
    /// already-ended session.
    async fn sign_out(&self, token: SessionToken) -> Result<(), ApiError>;

    /// Returns the live session behind `token`, or `None` when there is
    /// no such session (unknown token, signed out, or expired).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] on provider failure.
    async fn current_session(&self, token: SessionToken) -> Result<Option<Session>, ApiError>;

    /// Subscribes to session-change notifications.
    fn subscribe(&self) -> broadcast::Receiver<SessionChange>;
}

/// Credential provider backed by the `ADMIN_EMAIL`/`ADMIN_SECRET`
/// configuration pair, with in-memory bearer sessions.
///
/// Expired sessions are dropped lazily on lookup and announced on the
/// change channel like any other session end.
#[derive(Debug)]
pub struct EnvAuthProvider {
    email: String,
    secret: String,
    ttl: Duration,
    sessions: RwLock<HashMap<SessionToken, Session>>,
    changes: broadcast::Sender<SessionChange>,
}

impl EnvAuthProvider {
    /// Creates a provider accepting the given credential pair, issuing
    /// sessions valid for `ttl_secs`.
    #[must_use]
    pub fn new(email: String, secret: String, ttl_secs: u64) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            email,
            secret,
            ttl: i64::try_from(ttl_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
            sessions: RwLock::new(HashMap::new()),
            changes,
        }
    }
}

#[async_trait]
impl AuthProvider for EnvAuthProvider {
    async fn sign_in(&self, email: &str, secret: &str) -> Result<Session, ApiError> {
        if email != self.email || secret != self.secret {
            tracing::warn!(email, "sign-in rejected");
            return Err(ApiError::Auth("invalid email or password".to_string()));
        }

        let session = Session::establish(email, self.ttl);
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token, session.clone());

        let _ = self.changes.send(SessionChange::SignedIn {
            token: session.token,
            email: session.email.clone(),
        });

        tracing::info!(email, "admin signed in");
        Ok(session)
    }

    async fn sign_out(&self, token: SessionToken) -> Result<(), ApiError> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(&token).is_some() {
            let _ = self.changes.send(SessionChange::SignedOut { token });
            tracing::info!(%token, "admin signed out");
        }
        Ok(())
    }

    async fn current_session(&self, token: SessionToken) -> Result<Option<Session>, ApiError> {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get(&token).cloned() else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            sessions.remove(&token);
            let _ = self.changes.send(SessionChange::Expired { token });
            return Ok(None);
        }

        Ok(Some(session))
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.changes.subscribe()
    }
}

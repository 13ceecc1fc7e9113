//! The admin session gate as an explicit state machine.
//!
//! The editor surface is reachable only through this gate. It starts in
//! `CheckingSession`, resolves to `Authenticated` or `Unauthenticated`,
//! and re-evaluates on every session-change notification from the
//! provider, so a sign-out performed elsewhere flips the gate back.

use super::provider::AuthProvider;
use super::session::{Session, SessionChange, SessionToken};
use crate::error::ApiError;

/// Observable gate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Initial state: the stored token (if any) has not been resolved yet.
    CheckingSession,
    /// A live session is attached; the editor is reachable.
    Authenticated(Session),
    /// No live session. `message` carries the provider-supplied error
    /// from the last failed sign-in, for the credential form to display.
    Unauthenticated {
        /// Displayable sign-in failure message, if any.
        message: Option<String>,
    },
}

/// Session gate driving access to the admin editor.
#[derive(Debug)]
pub struct SessionGate {
    state: GateState,
}

impl SessionGate {
    /// Creates a gate in the `CheckingSession` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: GateState::CheckingSession,
        }
    }

    /// Current gate state.
    #[must_use]
    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// True when the gate holds a live session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, GateState::Authenticated(_))
    }

    /// Resolves the initial state from a possibly-stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] when the provider itself fails; the
    /// gate falls back to `Unauthenticated` in that case too.
    pub async fn resolve(
        &mut self,
        provider: &dyn AuthProvider,
        token: Option<SessionToken>,
    ) -> Result<(), ApiError> {
        let Some(token) = token else {
            self.state = GateState::Unauthenticated { message: None };
            return Ok(());
        };

        match provider.current_session(token).await {
            Ok(Some(session)) => {
                self.state = GateState::Authenticated(session);
                Ok(())
            }
            Ok(None) => {
                self.state = GateState::Unauthenticated { message: None };
                Ok(())
            }
            Err(err) => {
                self.state = GateState::Unauthenticated { message: None };
                Err(err)
            }
        }
    }

    /// Submits the credential form.
    ///
    /// On success the gate becomes `Authenticated`; on rejection it
    /// stays `Unauthenticated`, keeping the provider's message for
    /// display.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`ApiError::Auth`] so the caller can
    /// surface it as well.
    pub async fn submit_credentials(
        &mut self,
        provider: &dyn AuthProvider,
        email: &str,
        secret: &str,
    ) -> Result<(), ApiError> {
        match provider.sign_in(email, secret).await {
            Ok(session) => {
                self.state = GateState::Authenticated(session);
                Ok(())
            }
            Err(err) => {
                self.state = GateState::Unauthenticated {
                    message: Some(err.to_string()),
                };
                Err(err)
            }
        }
    }

    /// Applies a session-change notification.
    ///
    /// Only changes concerning the attached session move the gate; a
    /// change that ends it returns the gate to `Unauthenticated`.
    pub fn apply(&mut self, change: &SessionChange) {
        let GateState::Authenticated(session) = &self.state else {
            return;
        };
        if change.token() == session.token && change.ends_session() {
            self.state = GateState::Unauthenticated { message: None };
        }
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

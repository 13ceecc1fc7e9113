//! Admin session types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Bearer token identifying one admin session.
///
/// Wraps a UUID v4, distinct from [`crate::domain::EventId`] at the type
/// level so the two can never be swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(uuid::Uuid);

impl SessionToken {
    /// Creates a new random token (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(Self)
    }
}

/// One authenticated admin context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Bearer token presented on admin requests.
    pub token: SessionToken,
    /// Email the session was established for.
    pub email: String,
    /// When the session was established.
    pub signed_in_at: DateTime<Utc>,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Establishes a fresh session for `email` valid for `ttl`.
    ///
    /// A TTL too large to represent saturates to the far future.
    #[must_use]
    pub fn establish(email: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: SessionToken::new(),
            email: email.to_string(),
            signed_in_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Whether the session has passed its expiry instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Notification emitted by the auth provider on every session change.
///
/// The admin gate subscribes to these to re-evaluate its state; a
/// sign-out performed elsewhere reaches every observer this way.
#[derive(Debug, Clone)]
pub enum SessionChange {
    /// A session was established.
    SignedIn {
        /// Token of the new session.
        token: SessionToken,
        /// Email the session belongs to.
        email: String,
    },
    /// A session was ended by an explicit sign-out.
    SignedOut {
        /// Token of the ended session.
        token: SessionToken,
    },
    /// A session lapsed past its TTL.
    Expired {
        /// Token of the lapsed session.
        token: SessionToken,
    },
}

impl SessionChange {
    /// Returns the token the change concerns.
    #[must_use]
    pub const fn token(&self) -> SessionToken {
        match self {
            Self::SignedIn { token, .. } | Self::SignedOut { token } | Self::Expired { token } => {
                *token
            }
        }
    }

    /// True when the change ends the session (sign-out or expiry).
    #[must_use]
    pub const fn ends_session(&self) -> bool {
        matches!(self, Self::SignedOut { .. } | Self::Expired { .. })
    }
}

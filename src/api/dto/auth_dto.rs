//! Auth DTOs for the sign-in form and session lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{Session, SessionToken};

/// Request body for `POST /auth/sign-in` (the credential form).
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInRequest {
    /// Admin email.
    pub email: String,
    /// Admin secret.
    pub secret: String,
}

/// An established admin session as returned to the client.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Bearer token to present on admin requests.
    #[schema(value_type = String)]
    pub token: SessionToken,
    /// Email the session belongs to.
    pub email: String,
    /// When the session was established.
    pub signed_in_at: DateTime<Utc>,
    /// When the session lapses.
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            email: session.email,
            signed_in_at: session.signed_in_at,
            expires_at: session.expires_at,
        }
    }
}

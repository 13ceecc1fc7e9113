//! Bearer-session extractor for admin routes.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use super::session::{Session, SessionToken};
use crate::app_state::AppState;
use crate::error::ApiError;

/// Extractor placing the live admin session into a handler.
///
/// Reads `Authorization: Bearer <token>`, resolves it through the auth
/// provider, and rejects with 401 when the header is missing, malformed,
/// or names no live session. Every admin handler takes this as its first
/// argument; there is no other path to a mutation.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token: SessionToken = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .and_then(|raw| raw.parse().ok())
            .ok_or(ApiError::Unauthorized)?;

        let session = state
            .auth
            .current_session(token)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(Self(session))
    }
}

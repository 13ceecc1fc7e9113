//! Auth endpoints exposing the provider to the site: the credential
//! form's sign-in, sign-out, and the session lookup the gate performs on
//! load.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{SessionResponse, SignInRequest};
use crate::app_state::AppState;
use crate::auth::SessionToken;
use crate::error::{ApiError, ErrorResponse};

/// `POST /auth/sign-in` — Establish an admin session.
///
/// # Errors
///
/// Returns [`ApiError::Auth`] with a displayable message when the
/// credentials are rejected; the client stays on the credential form.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    tag = "Auth",
    summary = "Sign in",
    description = "Submits the credential form and returns a bearer session on success.",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Session established", body = SessionResponse),
        (status = 401, description = "Credentials rejected", body = ErrorResponse),
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.auth.sign_in(&request.email, &request.secret).await?;
    Ok(Json(SessionResponse::from(session)))
}

/// `POST /auth/sign-out` — End the presented session.
///
/// Idempotent: a missing, malformed, or already-ended token still
/// answers 204.
///
/// # Errors
///
/// Returns [`ApiError::Auth`] only on provider failure.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-out",
    tag = "Auth",
    summary = "Sign out",
    description = "Ends the bearer session, notifying every gate observing it.",
    responses(
        (status = 204, description = "Session ended (or was already gone)"),
    )
)]
pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        state.auth.sign_out(token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /auth/session` — Look up the presented session.
///
/// Returns the session when it is live, `null` otherwise; this is the
/// call the gate makes while in its checking state.
///
/// # Errors
///
/// Returns [`ApiError::Auth`] only on provider failure.
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    tag = "Auth",
    summary = "Current session",
    description = "Resolves the bearer token to its session, or null when none is live.",
    responses(
        (status = 200, description = "Session or null", body = Option<SessionResponse>),
    )
)]
pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let session = match bearer_token(&headers) {
        Some(token) => state.auth.current_session(token).await?,
        None => None,
    };
    Ok(Json(session.map(SessionResponse::from)))
}

/// Extracts a bearer session token from the request headers, if any.
fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    raw.strip_prefix("Bearer ")?.trim().parse().ok()
}

/// Auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-out", post(sign_out))
        .route("/auth/session", get(current_session))
}

//! Admin editor endpoints: the full CRUD surface plus link sharing.
//!
//! Every handler takes the [`AdminSession`] extractor, so nothing here is
//! reachable without a live session.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{EventPayload, EventResponse, ShareLinkResponse};
use crate::app_state::AppState;
use crate::auth::AdminSession;
use crate::domain::EventId;
use crate::error::{ApiError, ErrorResponse};

/// `GET /admin/events` — All records for the editor list.
///
/// Unpartitioned; the editor renders the kind badge and the
/// Upcoming/Past badge per row from the same response fields.
///
/// # Errors
///
/// Returns [`ApiError::StoreUnavailable`] when the store cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/admin/events",
    tag = "Admin",
    summary = "List events for the editor",
    description = "Returns every record, newest-created first, for the admin list display.",
    responses(
        (status = 200, description = "All event records", body = Vec<EventResponse>),
        (status = 401, description = "No live admin session", body = ErrorResponse),
    )
)]
pub async fn list_all_events(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.event_service.list().await?;
    let records: Vec<EventResponse> = records.into_iter().map(EventResponse::from).collect();
    Ok(Json(records))
}

/// `POST /admin/events` — Create a new event record.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when the title is empty.
#[utoipa::path(
    post,
    path = "/api/v1/admin/events",
    tag = "Admin",
    summary = "Create an event",
    description = "Assigns a fresh id and creation timestamp and persists the record.",
    request_body = EventPayload,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "No live admin session", body = ErrorResponse),
    )
)]
pub async fn create_event(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.event_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(record))))
}

/// `PUT /admin/events/{id}` — Replace all mutable fields of a record.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] when the id matches no record, or
/// [`ApiError::Validation`] when the title is empty.
#[utoipa::path(
    put,
    path = "/api/v1/admin/events/{id}",
    tag = "Admin",
    summary = "Update an event",
    description = "Full-field replace keyed by id; id and creation timestamp are preserved.",
    params(
        ("id" = String, Path, description = "Event identifier"),
    ),
    request_body = EventPayload,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "No live admin session", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn update_event(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(payload): Json<EventPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let Ok(id) = event_id.parse::<EventId>() else {
        return Err(ApiError::EventNotFound(event_id));
    };
    let record = state.event_service.update(id, payload.into()).await?;
    Ok(Json(EventResponse::from(record)))
}

/// `DELETE /admin/events/{id}` — Remove a record.
///
/// Idempotent: an absent id (including a malformed one) still answers
/// 204. There is deliberately no confirmation handshake here; that
/// guard, if ever added, belongs to the editor UI.
///
/// # Errors
///
/// Returns [`ApiError::StoreUnavailable`] when the store cannot be
/// written.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/events/{id}",
    tag = "Admin",
    summary = "Delete an event",
    description = "Hard delete, idempotent.",
    params(
        ("id" = String, Path, description = "Event identifier"),
    ),
    responses(
        (status = 204, description = "Event deleted (or was already gone)"),
        (status = 401, description = "No live admin session", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if let Ok(id) = event_id.parse::<EventId>() {
        state.event_service.delete(id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /admin/events/{id}/share-link` — Shareable URL for a record.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] when the id matches no record.
#[utoipa::path(
    get,
    path = "/api/v1/admin/events/{id}/share-link",
    tag = "Admin",
    summary = "Get the shareable link for an event",
    description = "Joins the configured site origin with /events/{id}; the editor copies it to the clipboard.",
    params(
        ("id" = String, Path, description = "Event identifier"),
    ),
    responses(
        (status = 200, description = "Shareable URL", body = ShareLinkResponse),
        (status = 401, description = "No live admin session", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn share_link(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Ok(id) = event_id.parse::<EventId>() else {
        return Err(ApiError::EventNotFound(event_id));
    };
    let url = state.event_service.share_link(id).await?;
    Ok(Json(ShareLinkResponse { event_id: id, url }))
}

/// Admin editor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/events",
            get(list_all_events).post(create_event),
        )
        .route(
            "/admin/events/{id}",
            axum::routing::put(update_event).delete(delete_event),
        )
        .route("/admin/events/{id}/share-link", get(share_link))
}

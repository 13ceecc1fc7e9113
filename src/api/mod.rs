//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api/v1`, except `/health` and the
//! OpenAPI document.

pub mod dto;
pub mod handlers;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        handlers::events::list_events,
        handlers::events::get_event,
        handlers::admin::list_all_events,
        handlers::admin::create_event,
        handlers::admin::update_event,
        handlers::admin::delete_event,
        handlers::admin::share_link,
        handlers::auth::sign_in,
        handlers::auth::sign_out,
        handlers::auth::current_session,
        handlers::system::health_handler,
    ),
    tags(
        (name = "Events", description = "Public event listing and detail resolution"),
        (name = "Admin", description = "Session-gated event editor"),
        (name = "Auth", description = "Admin session management"),
        (name = "System", description = "Service health"),
    )
)]
struct ApiDoc;

/// Serves the generated OpenAPI document as JSON.
async fn openapi_handler() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
        .route("/api-docs/openapi.json", get(openapi_handler))
}

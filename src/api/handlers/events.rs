//! Public event endpoints: the partitioned listing and the detail
//! resolver. Read-only; mutations live behind the admin routes.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{EventListResponse, EventResponse};
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::{ApiError, ErrorResponse};

/// `GET /events` — Full listing, partitioned into upcoming and past.
///
/// A pure filter on the upcoming flag; store order is preserved within
/// each partition. When the store cannot be read the listing degrades to
/// empty ("no data yet") instead of failing the page.
///
/// # Errors
///
/// Returns [`ApiError`] on internal failures other than store
/// unavailability.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns all events split into upcoming and past partitions, newest-created first.",
    responses(
        (status = 200, description = "Partitioned event listing", body = EventListResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let (upcoming, past) = match state.event_service.list_partitioned().await {
        Ok(partitions) => partitions,
        Err(ApiError::StoreUnavailable(err)) => {
            tracing::warn!(%err, "event store unavailable, serving empty listing");
            (Vec::new(), Vec::new())
        }
        Err(err) => return Err(err),
    };

    let upcoming: Vec<EventResponse> = upcoming.into_iter().map(EventResponse::from).collect();
    let past: Vec<EventResponse> = past.into_iter().map(EventResponse::from).collect();
    let total = upcoming.len() + past.len();

    Ok(Json(EventListResponse {
        upcoming,
        past,
        total,
    }))
}

/// `GET /events/{id}` — Event Detail Resolver.
///
/// The path segment is taken verbatim; a segment that parses to no known
/// record — including one that is not an identifier at all — resolves to
/// the not-found state, whose error body carries the path back to the
/// full listing.
///
/// # Errors
///
/// Returns [`ApiError::EventNotFound`] when the id matches no record.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get one event",
    description = "Returns the full record for a single event, for deep-linked detail pages.",
    params(
        ("id" = String, Path, description = "Event identifier from the shareable link"),
    ),
    responses(
        (status = 200, description = "Event detail", body = EventResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Ok(id) = event_id.parse::<EventId>() else {
        return Err(ApiError::EventNotFound(event_id));
    };

    let record = state
        .event_service
        .get(id)
        .await?
        .ok_or_else(|| ApiError::EventNotFound(event_id))?;

    Ok(Json(EventResponse::from(record)))
}

/// Public event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/{id}", get(get_event))
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::app_state::AppState;
    use crate::auth::EnvAuthProvider;
    use crate::domain::{ChangeFeed, EventDraft, EventKind};
    use crate::service::EventService;
    use crate::store::LocalStore;

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir().join(format!("aeroclub-events-api-{}.json", uuid::Uuid::new_v4()))
    }

    async fn make_state(path: &PathBuf) -> AppState {
        let Ok(()) = tokio::fs::write(path, b"[]").await else {
            panic!("failed to prepare store file");
        };
        let Ok(store) = LocalStore::open(path.clone()).await else {
            panic!("failed to open store");
        };
        let change_feed = ChangeFeed::new(16);
        let event_service = Arc::new(EventService::new(
            Arc::new(store),
            change_feed.clone(),
            "https://club.example".to_string(),
        ));
        let auth = Arc::new(EnvAuthProvider::new(
            "admin@club.example".to_string(),
            "hangar-9".to_string(),
            3600,
        ));
        AppState {
            event_service,
            auth,
            change_feed,
        }
    }

    fn make_app(state: AppState) -> Router {
        crate::api::build_router().with_state(state)
    }

    fn make_draft(title: &str, upcoming: bool) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            date: "Feb 15, 2025".to_string(),
            time: None,
            location: None,
            description: None,
            kind: EventKind::Workshop,
            registration_link: None,
            is_upcoming: upcoming,
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let Ok(collected) = response.into_body().collect().await else {
            panic!("failed to read body");
        };
        let Ok(value) = serde_json::from_slice(&collected.to_bytes()) else {
            panic!("body is not JSON");
        };
        value
    }

    #[tokio::test]
    async fn listing_partitions_by_upcoming_flag() {
        let path = temp_store_path();
        let state = make_state(&path).await;

        let Ok(_) = state.event_service.create(make_draft("Workshop A", true)).await else {
            panic!("create failed");
        };
        let Ok(_) = state.event_service.create(make_draft("Old Show", false)).await else {
            panic!("create failed");
        };

        let app = make_app(state);
        let Ok(response) = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/events")
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["upcoming"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["past"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["total"], 2);
        assert_eq!(body["upcoming"][0]["title"], "Workshop A");

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn detail_returns_full_record() {
        let path = temp_store_path();
        let state = make_state(&path).await;

        let mut draft = make_draft("Aerodynamics Workshop", true);
        draft.registration_link = Some("https://forms.example.com/x".to_string());
        let Ok(record) = state.event_service.create(draft).await else {
            panic!("create failed");
        };

        let app = make_app(state);
        let Ok(response) = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/events/{}", record.id))
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["title"], "Aerodynamics Workshop");
        assert_eq!(body["type"], "Workshop");
        assert_eq!(body["registrationOpen"], true);
        assert_eq!(body["registrationLink"], "https://forms.example.com/x");

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn unknown_id_renders_not_found_with_listing_path() {
        let path = temp_store_path();
        let state = make_state(&path).await;
        let app = make_app(state);

        let Ok(response) = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/events/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], 2001);
        assert_eq!(body["error"]["details"], "/events");

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn malformed_id_segment_is_also_not_found() {
        let path = temp_store_path();
        let state = make_state(&path).await;
        let app = make_app(state);

        let Ok(response) = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/events/not-a-real-id")
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn registration_closed_without_link() {
        let path = temp_store_path();
        let state = make_state(&path).await;

        let mut draft = make_draft("Aerodynamics Workshop", true);
        draft.registration_link = Some(String::new());
        let Ok(_) = state.event_service.create(draft).await else {
            panic!("create failed");
        };

        let app = make_app(state);
        let Ok(response) = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/events")
                    .body(Body::empty())
                    .unwrap_or_default(),
            )
            .await
        else {
            panic!("request failed");
        };
        let body = body_json(response).await;
        assert_eq!(body["upcoming"][0]["registrationOpen"], false);

        tokio::fs::remove_file(&path).await.ok();
    }
}

//! aeroclub-events server entry point.
//!
//! Starts the Axum HTTP server with the REST API and the change-feed
//! WebSocket endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use aeroclub_events::api;
use aeroclub_events::app_state::AppState;
use aeroclub_events::auth::{AuthProvider, EnvAuthProvider};
use aeroclub_events::config::{ServerConfig, StoreBackend};
use aeroclub_events::domain::ChangeFeed;
use aeroclub_events::service::EventService;
use aeroclub_events::store::{EventStore, LocalStore, PostgresStore};
use aeroclub_events::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(addr = %config.listen_addr, "starting aeroclub-events");

    // Build the selected store backend
    let store: Arc<dyn EventStore> = match &config.store_backend {
        StoreBackend::Local { path } => Arc::new(LocalStore::open(path.clone()).await?),
        StoreBackend::Postgres {
            database_url,
            max_connections,
            connect_timeout_secs,
        } => {
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .acquire_timeout(Duration::from_secs(*connect_timeout_secs))
                .connect(database_url)
                .await?;
            let store = PostgresStore::new(pool);
            store.migrate().await?;
            Arc::new(store)
        }
    };
    tracing::info!(backend = store.backend_tag(), "event store ready");

    // Build domain and service layers
    let change_feed = ChangeFeed::new(config.change_feed_capacity);
    let event_service = Arc::new(EventService::new(
        Arc::clone(&store),
        change_feed.clone(),
        config.site_origin.clone(),
    ));
    let auth: Arc<dyn AuthProvider> = Arc::new(EnvAuthProvider::new(
        config.admin_email.clone(),
        config.admin_secret.clone(),
        config.session_ttl_secs,
    ));

    // Build application state
    let app_state = AppState {
        event_service,
        auth,
        change_feed,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

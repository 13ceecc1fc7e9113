//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::domain::ChangeFeed;
use crate::service::EventService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event service for all store operations.
    pub event_service: Arc<EventService>,
    /// Auth provider backing the admin session gate.
    pub auth: Arc<dyn AuthProvider>,
    /// Change feed for WebSocket subscriptions.
    pub change_feed: ChangeFeed,
}

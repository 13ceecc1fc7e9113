//! WebSocket upgrade endpoint.

use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;

use super::connection;
use crate::app_state::AppState;

/// `GET /ws` — Upgrades the connection and streams store changes.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let changes = state.change_feed.subscribe();
    ws.on_upgrade(move |socket| connection::serve(socket, changes))
}

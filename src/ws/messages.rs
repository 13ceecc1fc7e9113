//! Outbound WebSocket frame types.

use serde::Serialize;

use crate::domain::StoreChange;

/// Frames pushed to a connected page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once on connect, confirming the subscription is live.
    Subscribed,
    /// A store mutation happened; the page should re-read the listing.
    StoreChange(StoreChange),
}

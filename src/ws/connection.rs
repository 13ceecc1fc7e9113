//! Per-connection forwarding loop.

use axum::extract::ws::{Message, WebSocket};
use futures_util::sink::SinkExt;
use futures_util::stream::{SplitSink, StreamExt};
use tokio::sync::broadcast;

use super::messages::ServerMessage;
use crate::domain::StoreChange;

/// Drives one WebSocket connection until the peer disconnects.
///
/// Forwards every [`StoreChange`] from the feed as a JSON frame. A
/// lagging receiver just skips dropped changes; the page re-fetches the
/// full listing on every frame anyway, so nothing is lost.
pub async fn serve(socket: WebSocket, mut changes: broadcast::Receiver<StoreChange>) {
    let (mut sink, mut stream) = socket.split();

    if send_frame(&mut sink, &ServerMessage::Subscribed).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            change = changes.recv() => match change {
                Ok(change) => {
                    if send_frame(&mut sink, &ServerMessage::StoreChange(change))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "ws receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // pings are answered by the protocol layer
                Some(Err(err)) => {
                    tracing::debug!(%err, "ws read error");
                    break;
                }
            },
        }
    }
}

/// Serializes and sends one frame.
async fn send_frame(
    sink: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let Ok(json) = serde_json::to_string(message) else {
        return Ok(());
    };
    sink.send(Message::Text(json.into())).await
}

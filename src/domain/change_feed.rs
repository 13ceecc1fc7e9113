//! Broadcast channel for store change notifications.
//!
//! [`ChangeFeed`] wraps a [`tokio::sync::broadcast`] channel. Every store
//! mutation publishes a [`StoreChange`] through the feed, and WebSocket
//! connections subscribe to forward changes to open pages.

use tokio::sync::broadcast;

use super::StoreChange;

/// Broadcast bus for [`StoreChange`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity.
/// When the ring buffer is full, the oldest changes are dropped for
/// lagging receivers; a lagging page simply re-fetches the full list.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<StoreChange>,
}

impl ChangeFeed {
    /// Creates a new `ChangeFeed` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes a change to all subscribers.
    ///
    /// Returns the number of receivers that received the change.
    /// If there are no active receivers, the change is silently dropped.
    pub fn publish(&self, change: StoreChange) -> usize {
        self.sender.send(change).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future changes.
    ///
    /// Each WebSocket connection should call this once on connect.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

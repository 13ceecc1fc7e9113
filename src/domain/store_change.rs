//! Change notifications reflecting event store mutations.
//!
//! Every successful mutation emits a [`StoreChange`] through the
//! [`super::ChangeFeed`]. Changes are pushed to WebSocket subscribers so
//! open pages can re-read the store instead of rendering stale lists.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{EventId, EventKind};

/// Change notification emitted after every successful store mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum StoreChange {
    /// A new event record was created.
    EventCreated {
        /// Record identifier.
        id: EventId,
        /// Record title at creation time.
        title: String,
        /// Category badge.
        kind: EventKind,
        /// Which partition the record landed in.
        is_upcoming: bool,
        /// Mutation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// An existing record was replaced.
    EventUpdated {
        /// Record identifier.
        id: EventId,
        /// Record title after the update.
        title: String,
        /// Partition after the update.
        is_upcoming: bool,
        /// Mutation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A record was hard-deleted.
    EventDeleted {
        /// Record identifier.
        id: EventId,
        /// Mutation timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl StoreChange {
    /// Returns the record ID associated with this change.
    #[must_use]
    pub fn event_id(&self) -> EventId {
        match self {
            Self::EventCreated { id, .. }
            | Self::EventUpdated { id, .. }
            | Self::EventDeleted { id, .. } => *id,
        }
    }

    /// Returns the change kind as a static string slice.
    #[must_use]
    pub const fn change_str(&self) -> &'static str {
        match self {
            Self::EventCreated { .. } => "event_created",
            Self::EventUpdated { .. } => "event_updated",
            Self::EventDeleted { .. } => "event_deleted",
        }
    }
}

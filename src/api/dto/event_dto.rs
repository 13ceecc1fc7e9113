//! Event-related DTOs for the public listing, the detail resolver, and
//! the admin editor.
//!
//! Wire bodies use the site's historical camelCase field names, with the
//! category appearing as `type`. Translation to the canonical record
//! shape happens here and nowhere deeper.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EventDraft, EventId, EventKind, EventRecord};

/// Request body for creating or fully replacing an event record.
///
/// The same shape serves both flows: the editor form is one form.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// Event title. Must be non-empty.
    pub title: String,
    /// Free-form display date (e.g. `"Mar 15, 2025"`).
    pub date: String,
    /// Free-form display time range (e.g. `"10:00 AM - 4:00 PM"`).
    #[serde(default)]
    pub time: Option<String>,
    /// Venue.
    #[serde(default)]
    pub location: Option<String>,
    /// Event description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category badge. Defaults to `Workshop`.
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    /// Registration form URL; omit while registration is not open.
    #[serde(default)]
    pub registration_link: Option<String>,
    /// Partition flag. Defaults to upcoming.
    #[serde(default = "default_upcoming")]
    pub is_upcoming: bool,
}

fn default_upcoming() -> bool {
    true
}

impl From<EventPayload> for EventDraft {
    fn from(payload: EventPayload) -> Self {
        Self {
            title: payload.title,
            date: payload.date,
            time: payload.time,
            location: payload.location,
            description: payload.description,
            kind: payload.kind,
            registration_link: payload.registration_link,
            is_upcoming: payload.is_upcoming,
        }
    }
}

/// One event record as served to the site.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    /// Record identifier, the `/events/{id}` path segment.
    #[schema(value_type = String)]
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Display date.
    pub date: String,
    /// Display time range.
    pub time: Option<String>,
    /// Venue.
    pub location: Option<String>,
    /// Event description.
    pub description: Option<String>,
    /// Category badge.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Registration form URL, when registration is open.
    pub registration_link: Option<String>,
    /// Whether the registration call-to-action is an active link; false
    /// renders the disabled "Registration Coming Soon" state.
    pub registration_open: bool,
    /// Upcoming/Past badge flag.
    pub is_upcoming: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<EventRecord> for EventResponse {
    fn from(record: EventRecord) -> Self {
        let registration_open = record.registration_open();
        Self {
            id: record.id,
            title: record.title,
            date: record.date,
            time: record.time,
            location: record.location,
            description: record.description,
            kind: record.kind,
            registration_link: record.registration_link,
            registration_open,
            is_upcoming: record.is_upcoming,
            created_at: record.created_at,
        }
    }
}

/// Response body for the public listing, pre-partitioned for the two
/// sections the events page renders.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Upcoming events, newest-created first.
    pub upcoming: Vec<EventResponse>,
    /// Past events, newest-created first.
    pub past: Vec<EventResponse>,
    /// Total number of records across both partitions.
    pub total: usize,
}

/// Response body for the admin share-link endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinkResponse {
    /// Record the link points at.
    #[schema(value_type = String)]
    pub event_id: EventId,
    /// Absolute shareable URL (`{site origin}/events/{id}`).
    pub url: String,
}

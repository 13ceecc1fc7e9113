//! The event record entity and its creatable field set.
//!
//! [`EventRecord`] is the persisted unit describing one club event or
//! workshop. Canonical field naming lives here; the REST layer and the
//! PostgreSQL store translate to their own conventions at their own
//! boundaries, never in between.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EventId;
use crate::error::ApiError;

/// Category of a club event, shown as a badge on every listing.
///
/// Serialized with the exact strings the site has always used, so stored
/// data from earlier revisions keeps deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
pub enum EventKind {
    /// Hands-on workshop session.
    #[default]
    Workshop,
    /// Skill training (e.g. simulator hours).
    Training,
    /// General club event.
    Event,
    /// Competitive event.
    Competition,
    /// Talk or lecture.
    Seminar,
}

impl EventKind {
    /// Returns the kind as its serialized string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workshop => "Workshop",
            Self::Training => "Training",
            Self::Event => "Event",
            Self::Competition => "Competition",
            Self::Seminar => "Seminar",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Workshop" => Ok(Self::Workshop),
            "Training" => Ok(Self::Training),
            "Event" => Ok(Self::Event),
            "Competition" => Ok(Self::Competition),
            "Seminar" => Ok(Self::Seminar),
            other => Err(ApiError::Validation(format!("unknown event kind: {other}"))),
        }
    }
}

/// One persisted event record.
///
/// The serde attributes define the canonical serialized form (the same
/// camelCase shape the site stores and ships), with `kind` appearing as
/// the historical `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Store-assigned identifier, immutable for the record's lifetime.
    pub id: EventId,
    /// Event title. Required and non-empty for persistence.
    pub title: String,
    /// Free-form display date (e.g. `"Feb 15, 2025"`).
    pub date: String,
    /// Free-form display time range (e.g. `"10:00 AM - 4:00 PM"`).
    #[serde(default)]
    pub time: Option<String>,
    /// Venue.
    #[serde(default)]
    pub location: Option<String>,
    /// Longer description shown on the detail page.
    #[serde(default)]
    pub description: Option<String>,
    /// Category badge.
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    /// Registration form URL. Absent or empty means registration is not
    /// open yet. Treated as an opaque external URL.
    #[serde(default)]
    pub registration_link: Option<String>,
    /// Partition discriminator: upcoming vs. past listing.
    pub is_upcoming: bool,
    /// Creation timestamp, the default ordering key (newest first).
    pub created_at: DateTime<Utc>,
}

impl EventRecord {
    /// Builds a record from a draft plus store-assigned identity fields.
    #[must_use]
    pub fn from_draft(id: EventId, draft: EventDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            date: draft.date,
            time: draft.time,
            location: draft.location,
            description: draft.description,
            kind: draft.kind,
            registration_link: draft.registration_link,
            is_upcoming: draft.is_upcoming,
            created_at,
        }
    }

    /// Whether the registration call-to-action should be an active link.
    ///
    /// True exactly when a non-empty registration URL is present; the
    /// site renders a disabled "Registration Coming Soon" state otherwise.
    #[must_use]
    pub fn registration_open(&self) -> bool {
        self.registration_link
            .as_deref()
            .is_some_and(|link| !link.trim().is_empty())
    }
}

/// The creatable and updatable field set: everything on [`EventRecord`]
/// except the store-assigned `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// Event title.
    pub title: String,
    /// Free-form display date.
    pub date: String,
    /// Free-form display time range.
    #[serde(default)]
    pub time: Option<String>,
    /// Venue.
    #[serde(default)]
    pub location: Option<String>,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category badge.
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    /// Registration form URL.
    #[serde(default)]
    pub registration_link: Option<String>,
    /// Partition discriminator. New events default to upcoming.
    #[serde(default = "default_upcoming")]
    pub is_upcoming: bool,
}

fn default_upcoming() -> bool {
    true
}

impl EventDraft {
    /// Checks the persistence constraints on the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when `title` is empty or
    /// whitespace-only. `registration_link` is deliberately not checked
    /// beyond this; it is an opaque external URL.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Splits records into the upcoming and past partitions.
///
/// A pure filter on `is_upcoming`; the store's ordering is preserved
/// within each partition.
#[must_use]
pub fn partition_upcoming(records: Vec<EventRecord>) -> (Vec<EventRecord>, Vec<EventRecord>) {
    records.into_iter().partition(|record| record.is_upcoming)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn draft(title: &str, upcoming: bool) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            date: "Feb 15, 2025".to_string(),
            time: Some("10:00 AM - 4:00 PM".to_string()),
            location: Some("Main Auditorium".to_string()),
            description: None,
            kind: EventKind::Workshop,
            registration_link: None,
            is_upcoming: upcoming,
        }
    }

    #[test]
    fn empty_title_fails_validation() {
        let result = draft("", true).validate();
        assert!(result.is_err());

        let result = draft("   ", true).validate();
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_title_passes_validation() {
        assert!(draft("Aerodynamics Workshop", true).validate().is_ok());
    }

    #[test]
    fn kind_defaults_to_workshop() {
        assert_eq!(EventKind::default(), EventKind::Workshop);
    }

    #[test]
    fn kind_round_trips_through_strings() {
        for kind in [
            EventKind::Workshop,
            EventKind::Training,
            EventKind::Event,
            EventKind::Competition,
            EventKind::Seminar,
        ] {
            let parsed: Result<EventKind, _> = kind.as_str().parse();
            assert_eq!(parsed.ok(), Some(kind));
        }
    }

    #[test]
    fn registration_open_requires_non_empty_link() {
        let id = EventId::new();
        let now = Utc::now();

        let mut record = EventRecord::from_draft(id, draft("Air Show", true), now);
        assert!(!record.registration_open());

        record.registration_link = Some(String::new());
        assert!(!record.registration_open());

        record.registration_link = Some("https://forms.example.com/x".to_string());
        assert!(record.registration_open());
    }

    #[test]
    fn partitions_are_disjoint_and_cover_all() {
        let now = Utc::now();
        let records: Vec<EventRecord> = [
            ("Workshop A", true),
            ("Old Show", false),
            ("Workshop B", true),
            ("Old Training", false),
        ]
        .into_iter()
        .map(|(title, upcoming)| EventRecord::from_draft(EventId::new(), draft(title, upcoming), now))
        .collect();

        let total = records.len();
        let (upcoming, past) = partition_upcoming(records);

        assert_eq!(upcoming.len() + past.len(), total);
        assert!(upcoming.iter().all(|record| record.is_upcoming));
        assert!(past.iter().all(|record| !record.is_upcoming));
        for record in &upcoming {
            assert!(!past.iter().any(|other| other.id == record.id));
        }
    }

    #[test]
    fn serialized_form_uses_site_field_names() {
        let record = EventRecord::from_draft(EventId::new(), draft("Air Show", true), Utc::now());
        let json = serde_json::to_string(&record).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"type\":\"Workshop\""));
        assert!(json.contains("\"isUpcoming\":true"));
        assert!(json.contains("\"registrationLink\""));
    }

    #[test]
    fn legacy_blob_with_empty_link_deserializes() {
        let json = r#"{
            "id": "6b7f9b54-6a3e-4f9b-9a47-0d2640b6c6ef",
            "title": "Annual Air Show",
            "date": "Mar 10, 2025",
            "time": "9:00 AM - 5:00 PM",
            "location": "University Ground",
            "description": "Annual showcase of all club projects.",
            "type": "Event",
            "registrationLink": "",
            "isUpcoming": true,
            "createdAt": "2025-01-01T00:00:00Z"
        }"#;
        let record: Result<EventRecord, _> = serde_json::from_str(json);
        let Ok(record) = record else {
            panic!("legacy blob failed to deserialize");
        };
        assert_eq!(record.kind, EventKind::Event);
        assert!(!record.registration_open());
    }
}

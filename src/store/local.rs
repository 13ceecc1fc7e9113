//! Local file implementation of the event store.
//!
//! The whole record set lives in memory behind an async `RwLock` and is
//! rewritten to a single JSON file on every mutation, the same
//! one-serialized-collection shape the site originally kept in browser
//! storage. Suited to the single-admin deployment the club actually runs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::EventStore;
use crate::domain::{EventDraft, EventId, EventKind, EventRecord};
use crate::error::ApiError;

/// JSON-file-backed event store.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    records: RwLock<Vec<EventRecord>>,
}

impl LocalStore {
    /// Opens the store at the given path.
    ///
    /// When no file exists yet, the store is seeded with the club's
    /// default events and written out immediately. An unreadable or
    /// corrupt file degrades to an empty set with a warning instead of
    /// refusing to start; the file is rewritten on the next mutation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StoreUnavailable`] when the initial seed file
    /// cannot be written.
    pub async fn open(path: PathBuf) -> Result<Self, ApiError> {
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<EventRecord>>(&bytes) {
                Ok(records) => records,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "event file corrupt, starting empty");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let seeded = seed_records();
                write_records(&path, &seeded).await?;
                tracing::info!(path = %path.display(), count = seeded.len(), "seeded default events");
                seeded
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "event file unreadable, starting empty");
                Vec::new()
            }
        };

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }
}

#[async_trait]
impl EventStore for LocalStore {
    fn backend_tag(&self) -> &'static str {
        "local"
    }

    async fn list(&self) -> Result<Vec<EventRecord>, ApiError> {
        let records = self.records.read().await;
        let mut sorted = records.clone();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sorted)
    }

    async fn get(&self, id: EventId) -> Result<Option<EventRecord>, ApiError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn create(&self, draft: EventDraft) -> Result<EventRecord, ApiError> {
        let record = EventRecord::from_draft(EventId::new(), draft, Utc::now());

        let mut records = self.records.write().await;
        let mut next = records.clone();
        next.push(record.clone());
        // Persist before committing so memory and disk cannot diverge.
        write_records(&self.path, &next).await?;
        *records = next;

        Ok(record)
    }

    async fn update(&self, id: EventId, draft: EventDraft) -> Result<EventRecord, ApiError> {
        let mut records = self.records.write().await;
        let mut next = records.clone();

        let slot = next
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| ApiError::EventNotFound(id.to_string()))?;
        let updated = EventRecord::from_draft(id, draft, slot.created_at);
        *slot = updated.clone();

        write_records(&self.path, &next).await?;
        *records = next;

        Ok(updated)
    }

    async fn delete(&self, id: EventId) -> Result<bool, ApiError> {
        let mut records = self.records.write().await;
        let mut next = records.clone();
        let before = next.len();
        next.retain(|record| record.id != id);

        if next.len() == before {
            return Ok(false);
        }

        write_records(&self.path, &next).await?;
        *records = next;
        Ok(true)
    }
}

/// Serializes the full record set to disk.
async fn write_records(path: &Path, records: &[EventRecord]) -> Result<(), ApiError> {
    let json = serde_json::to_vec_pretty(records)
        .map_err(|err| ApiError::Internal(format!("event serialization failed: {err}")))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|err| ApiError::StoreUnavailable(format!("event file write failed: {err}")))
}

/// The three default events the site ships with, used to seed a brand-new
/// store so the public pages are never empty on first deploy.
fn seed_records() -> Vec<EventRecord> {
    let now = Utc::now();
    let drafts = [
        EventDraft {
            title: "Aerodynamics Workshop".to_string(),
            date: "Feb 15, 2025".to_string(),
            time: Some("10:00 AM - 4:00 PM".to_string()),
            location: Some("Main Auditorium".to_string()),
            description: Some(
                "Learn the fundamentals of aircraft aerodynamics and wing design principles."
                    .to_string(),
            ),
            kind: EventKind::Workshop,
            registration_link: None,
            is_upcoming: true,
        },
        EventDraft {
            title: "Flight Simulator Training".to_string(),
            date: "Feb 22, 2025".to_string(),
            time: Some("2:00 PM - 6:00 PM".to_string()),
            location: Some("Simulation Lab".to_string()),
            description: Some(
                "Hands-on training with professional RC flight simulators.".to_string(),
            ),
            kind: EventKind::Training,
            registration_link: None,
            is_upcoming: true,
        },
        EventDraft {
            title: "Annual Air Show".to_string(),
            date: "Mar 10, 2025".to_string(),
            time: Some("9:00 AM - 5:00 PM".to_string()),
            location: Some("University Ground".to_string()),
            description: Some(
                "Annual showcase of all club projects with live flight demonstrations."
                    .to_string(),
            ),
            kind: EventKind::Event,
            registration_link: None,
            is_upcoming: true,
        },
    ];

    drafts
        .into_iter()
        .map(|draft| EventRecord::from_draft(EventId::new(), draft, now))
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir().join(format!("aeroclub-events-{}.json", uuid::Uuid::new_v4()))
    }

    fn make_draft(title: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            date: "Feb 15, 2025".to_string(),
            time: Some("10:00 AM - 4:00 PM".to_string()),
            location: Some("Main Auditorium".to_string()),
            description: None,
            kind: EventKind::Workshop,
            registration_link: None,
            is_upcoming: true,
        }
    }

    async fn open_empty(path: &PathBuf) -> LocalStore {
        // Write an empty collection first so the store does not seed.
        let Ok(()) = tokio::fs::write(path, b"[]").await else {
            panic!("failed to prepare store file");
        };
        let Ok(store) = LocalStore::open(path.clone()).await else {
            panic!("failed to open store");
        };
        store
    }

    #[tokio::test]
    async fn create_then_get_returns_stored_record() {
        let path = temp_store_path();
        let store = open_empty(&path).await;

        let draft = make_draft("Aerodynamics Workshop");
        let Ok(created) = store.create(draft.clone()).await else {
            panic!("create failed");
        };
        assert!(!created.id.to_string().is_empty());
        assert_eq!(created.title, draft.title);

        let Ok(Some(fetched)) = store.get(created.id).await else {
            panic!("get failed");
        };
        assert_eq!(fetched, created);

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_identity() {
        let path = temp_store_path();
        let store = open_empty(&path).await;

        let Ok(created) = store.create(make_draft("Flight Simulator Training")).await else {
            panic!("create failed");
        };

        let mut new_draft = make_draft("Flight Simulator Training");
        new_draft.registration_link = Some("https://forms.example.com/x".to_string());
        new_draft.is_upcoming = false;

        let Ok(updated) = store.update(created.id, new_draft.clone()).await else {
            panic!("update failed");
        };
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.registration_link, new_draft.registration_link);
        assert!(!updated.is_upcoming);

        let Ok(Some(fetched)) = store.get(created.id).await else {
            panic!("get failed");
        };
        assert_eq!(fetched, updated);

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let path = temp_store_path();
        let store = open_empty(&path).await;

        let result = store.update(EventId::new(), make_draft("Ghost")).await;
        assert!(matches!(result, Err(ApiError::EventNotFound(_))));

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let path = temp_store_path();
        let store = open_empty(&path).await;

        let Ok(created) = store.create(make_draft("Annual Air Show")).await else {
            panic!("create failed");
        };

        let Ok(removed) = store.delete(created.id).await else {
            panic!("delete failed");
        };
        assert!(removed);

        let Ok(after) = store.get(created.id).await else {
            panic!("get failed");
        };
        assert!(after.is_none());

        // Second delete of the same id is not an error.
        let Ok(removed_again) = store.delete(created.id).await else {
            panic!("second delete failed");
        };
        assert!(!removed_again);

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let path = temp_store_path();
        let store = open_empty(&path).await;

        let Ok(first) = store.create(make_draft("First")).await else {
            panic!("create failed");
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        let Ok(second) = store.create(make_draft("Second")).await else {
            panic!("create failed");
        };

        let Ok(listed) = store.list().await else {
            panic!("list failed");
        };
        let ids: Vec<EventId> = listed.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let path = temp_store_path();
        let created = {
            let store = open_empty(&path).await;
            let Ok(created) = store.create(make_draft("Persistent Workshop")).await else {
                panic!("create failed");
            };
            created
        };

        let Ok(reopened) = LocalStore::open(path.clone()).await else {
            panic!("reopen failed");
        };
        let Ok(Some(fetched)) = reopened.get(created.id).await else {
            panic!("get after reopen failed");
        };
        assert_eq!(fetched, created);

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn fresh_path_seeds_default_events() {
        let path = temp_store_path();
        let Ok(store) = LocalStore::open(path.clone()).await else {
            panic!("open failed");
        };

        let Ok(listed) = store.list().await else {
            panic!("list failed");
        };
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().all(|record| record.is_upcoming));
        assert!(
            listed
                .iter()
                .any(|record| record.title == "Aerodynamics Workshop")
        );

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn corrupt_file_degrades_to_empty() {
        let path = temp_store_path();
        let Ok(()) = tokio::fs::write(&path, b"not json at all").await else {
            panic!("failed to write corrupt file");
        };

        let Ok(store) = LocalStore::open(path.clone()).await else {
            panic!("open failed");
        };
        let Ok(listed) = store.list().await else {
            panic!("list failed");
        };
        assert!(listed.is_empty());

        tokio::fs::remove_file(&path).await.ok();
    }
}

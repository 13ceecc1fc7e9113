//! Event service: orchestrates store operations and emits changes.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    ChangeFeed, EventDraft, EventId, EventRecord, StoreChange, partition_upcoming,
};
use crate::error::ApiError;
use crate::store::EventStore;

/// Orchestration layer for all event operations.
///
/// Stateless coordinator: owns the injected [`EventStore`] and the
/// [`ChangeFeed`]. Every mutation follows the pattern: validate → call
/// the store → publish a change → return the stored record.
#[derive(Debug)]
pub struct EventService {
    store: Arc<dyn EventStore>,
    change_feed: ChangeFeed,
    site_origin: String,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>, change_feed: ChangeFeed, site_origin: String) -> Self {
        Self {
            store,
            change_feed,
            site_origin,
        }
    }

    /// Returns a reference to the inner [`ChangeFeed`].
    #[must_use]
    pub fn change_feed(&self) -> &ChangeFeed {
        &self.change_feed
    }

    /// Returns all records, newest-created first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StoreUnavailable`] on backend failure.
    pub async fn list(&self) -> Result<Vec<EventRecord>, ApiError> {
        self.store.list().await
    }

    /// Returns all records split into the upcoming and past partitions,
    /// store order preserved within each.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StoreUnavailable`] on backend failure.
    pub async fn list_partitioned(
        &self,
    ) -> Result<(Vec<EventRecord>, Vec<EventRecord>), ApiError> {
        Ok(partition_upcoming(self.store.list().await?))
    }

    /// Returns the record with the given id, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StoreUnavailable`] on backend failure.
    pub async fn get(&self, id: EventId) -> Result<Option<EventRecord>, ApiError> {
        self.store.get(id).await
    }

    /// Creates a new record from the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the draft's title is empty,
    /// or [`ApiError::StoreUnavailable`] on backend failure.
    pub async fn create(&self, draft: EventDraft) -> Result<EventRecord, ApiError> {
        draft.validate()?;
        let record = self.store.create(draft).await?;

        let _ = self.change_feed.publish(StoreChange::EventCreated {
            id: record.id,
            title: record.title.clone(),
            kind: record.kind,
            is_upcoming: record.is_upcoming,
            timestamp: Utc::now(),
        });

        tracing::info!(event_id = %record.id, title = %record.title, "event created");
        Ok(record)
    }

    /// Replaces all mutable fields of the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] on an empty title,
    /// [`ApiError::EventNotFound`] when no such record exists, or
    /// [`ApiError::StoreUnavailable`] on backend failure.
    pub async fn update(&self, id: EventId, draft: EventDraft) -> Result<EventRecord, ApiError> {
        draft.validate()?;
        let record = self.store.update(id, draft).await?;

        let _ = self.change_feed.publish(StoreChange::EventUpdated {
            id: record.id,
            title: record.title.clone(),
            is_upcoming: record.is_upcoming,
            timestamp: Utc::now(),
        });

        tracing::info!(event_id = %record.id, "event updated");
        Ok(record)
    }

    /// Removes the record with the given id. Idempotent.
    ///
    /// A change is published only when a record was actually removed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StoreUnavailable`] on backend failure.
    pub async fn delete(&self, id: EventId) -> Result<(), ApiError> {
        let removed = self.store.delete(id).await?;

        if removed {
            let _ = self.change_feed.publish(StoreChange::EventDeleted {
                id,
                timestamp: Utc::now(),
            });
            tracing::info!(event_id = %id, "event deleted");
        }

        Ok(())
    }

    /// Derives the shareable URL for the record with the given id.
    ///
    /// Joins the configured site origin with `/events/{id}`, matching the
    /// route the detail resolver serves.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] when no such record exists, or
    /// [`ApiError::StoreUnavailable`] on backend failure.
    pub async fn share_link(&self, id: EventId) -> Result<String, ApiError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApiError::EventNotFound(id.to_string()))?;
        Ok(format!("{}/events/{id}", self.site_origin))
    }
}

//! Persistence layer: the event store abstraction and its backends.
//!
//! [`EventStore`] is the single seam between the event data and where it
//! lives. Two backends exist: [`LocalStore`] keeps the whole record set
//! as one JSON file on disk, [`PostgresStore`] fronts a hosted table with
//! row-level operations. Consumers receive the store as an
//! `Arc<dyn EventStore>` and never touch the backend directly.

pub mod local;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{EventDraft, EventId, EventRecord};
use crate::error::ApiError;

pub use local::LocalStore;
pub use postgres::PostgresStore;

/// Source of truth for event records.
///
/// Within one server process, a mutation's success is visible to the next
/// `list`/`get` on the same store (read-after-write). Concurrent edits on
/// the same record follow last-write-wins; there is no version token.
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug {
    /// Short tag identifying the backend in logs.
    fn backend_tag(&self) -> &'static str;

    /// Returns all records, newest-created first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StoreUnavailable`] when the backend cannot be
    /// reached or read. Callers rendering the public listing treat that
    /// as "no data yet" rather than failing the page.
    async fn list(&self) -> Result<Vec<EventRecord>, ApiError>;

    /// Returns the record with the given id, or `None` when absent.
    ///
    /// Absence is a result, not an error; errors are reserved for
    /// backend failure.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StoreUnavailable`] on backend failure.
    async fn get(&self, id: EventId) -> Result<Option<EventRecord>, ApiError>;

    /// Assigns a fresh id and creation timestamp, persists the draft,
    /// and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StoreUnavailable`] on backend failure.
    async fn create(&self, draft: EventDraft) -> Result<EventRecord, ApiError>;

    /// Replaces all mutable fields of the record with the given id.
    ///
    /// `id` and `created_at` are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EventNotFound`] when no such record exists,
    /// or [`ApiError::StoreUnavailable`] on backend failure.
    async fn update(&self, id: EventId, draft: EventDraft) -> Result<EventRecord, ApiError>;

    /// Removes the record with the given id.
    ///
    /// Idempotent: deleting an absent id is `Ok(false)`, not an error.
    /// Returns `true` when a record was actually removed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StoreUnavailable`] on backend failure.
    async fn delete(&self, id: EventId) -> Result<bool, ApiError>;
}

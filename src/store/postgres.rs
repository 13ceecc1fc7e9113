//! PostgreSQL implementation of the event store.
//!
//! Fronts a hosted `events` table with row-level operations. Columns are
//! snake_case and `created_at` is server-assigned; the translation to the
//! canonical [`EventRecord`] shape happens here and nowhere else.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::EventStore;
use crate::domain::{EventDraft, EventId, EventKind, EventRecord};
use crate::error::ApiError;

/// One `events` row, in column order.
type EventRow = (
    Uuid,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    String,
    Option<String>,
    bool,
    DateTime<Utc>,
);

/// PostgreSQL-backed event store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StoreUnavailable`] when migrations fail.
    pub async fn migrate(&self) -> Result<(), ApiError> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|err| ApiError::StoreUnavailable(format!("migration failed: {err}")))
    }
}

#[async_trait]
impl EventStore for PostgresStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<EventRecord>, ApiError> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT id, title, date, time, location, description, kind, registration_link, \
             is_upcoming, created_at FROM events ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| ApiError::StoreUnavailable(err.to_string()))?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn get(&self, id: EventId) -> Result<Option<EventRecord>, ApiError> {
        let row = sqlx::query_as::<_, EventRow>(
            "SELECT id, title, date, time, location, description, kind, registration_link, \
             is_upcoming, created_at FROM events WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| ApiError::StoreUnavailable(err.to_string()))?;

        row.map(row_to_record).transpose()
    }

    async fn create(&self, draft: EventDraft) -> Result<EventRecord, ApiError> {
        let id = EventId::new();

        // created_at is assigned by the database (DEFAULT now()).
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "INSERT INTO events (id, title, date, time, location, description, kind, \
             registration_link, is_upcoming) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING created_at",
        )
        .bind(id.as_uuid())
        .bind(&draft.title)
        .bind(&draft.date)
        .bind(&draft.time)
        .bind(&draft.location)
        .bind(&draft.description)
        .bind(draft.kind.as_str())
        .bind(&draft.registration_link)
        .bind(draft.is_upcoming)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| ApiError::StoreUnavailable(err.to_string()))?;

        Ok(EventRecord::from_draft(id, draft, created_at))
    }

    async fn update(&self, id: EventId, draft: EventDraft) -> Result<EventRecord, ApiError> {
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "UPDATE events SET title = $2, date = $3, time = $4, location = $5, \
             description = $6, kind = $7, registration_link = $8, is_upcoming = $9 \
             WHERE id = $1 RETURNING created_at",
        )
        .bind(id.as_uuid())
        .bind(&draft.title)
        .bind(&draft.date)
        .bind(&draft.time)
        .bind(&draft.location)
        .bind(&draft.description)
        .bind(draft.kind.as_str())
        .bind(&draft.registration_link)
        .bind(draft.is_upcoming)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| ApiError::StoreUnavailable(err.to_string()))?
        .ok_or_else(|| ApiError::EventNotFound(id.to_string()))?;

        Ok(EventRecord::from_draft(id, draft, created_at))
    }

    async fn delete(&self, id: EventId) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|err| ApiError::StoreUnavailable(err.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Maps a database row onto the canonical record shape.
fn row_to_record(row: EventRow) -> Result<EventRecord, ApiError> {
    let (id, title, date, time, location, description, kind, registration_link, is_upcoming, created_at) =
        row;

    let kind: EventKind = kind
        .parse()
        .map_err(|_| ApiError::Internal(format!("stored event {id} has unknown kind: {kind}")))?;

    Ok(EventRecord {
        id: EventId::from_uuid(id),
        title,
        date,
        time,
        location,
        description,
        kind,
        registration_link,
        is_upcoming,
        created_at,
    })
}

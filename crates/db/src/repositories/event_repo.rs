//! Repository for the `events` audit table.

use sqlx::PgPool;
use tasklane_core::types::DbId;

use crate::models::event::EventRecord;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_type, source_table, entity_id, actor_id, payload, created_at";

/// Provides append and read operations for the change-event audit log.
pub struct EventRepo;

impl EventRepo {
    /// Append one event row.
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        source_table: &str,
        entity_id: Option<DbId>,
        actor_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<EventRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (event_type, source_table, entity_id, actor_id, payload)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(event_type)
            .bind(source_table)
            .bind(entity_id)
            .bind(actor_id)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// Most recent events, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<EventRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}

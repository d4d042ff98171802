//! Persisted change-event model (audit feed).

use serde::Serialize;
use sqlx::FromRow;
use tasklane_core::types::{DbId, Timestamp};

/// A row from the `events` table: one change event as it was published on
/// the in-process bus.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventRecord {
    pub id: DbId,
    pub event_type: String,
    pub source_table: String,
    pub entity_id: Option<DbId>,
    pub actor_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

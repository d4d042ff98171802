//! Attachment metadata model and DTOs.
//!
//! Only descriptive metadata is stored; the file bytes live in external
//! storage addressed by `storage_key`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasklane_core::types::{DbId, Timestamp};

/// A row from the `attachments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub task_id: DbId,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub storage_key: String,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for registering an attachment on a task.
#[derive(Debug, Deserialize)]
pub struct CreateAttachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub storage_key: String,
}

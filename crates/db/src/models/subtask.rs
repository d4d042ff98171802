//! Subtask entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasklane_core::types::{DbId, Timestamp};

/// A row from the `subtasks` table. Owned by a task and cascade-deleted
/// with it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subtask {
    pub id: DbId,
    pub task_id: DbId,
    pub content: String,
    pub completed: bool,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a subtask to a task.
#[derive(Debug, Deserialize)]
pub struct CreateSubtask {
    pub content: String,
}

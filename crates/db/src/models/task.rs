//! Task entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasklane_core::types::{DbId, Timestamp};

/// A row from the `tasks` table.
///
/// `status` and `priority` are stored as TEXT (CHECK-constrained) and
/// parsed into `tasklane_core::task` enums at the domain boundary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<Timestamp>,
    pub position: i32,
    pub parent_task_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task. The add action is scoped to one column, so
/// `status` names the column the card lands in (defaults to `todo`).
///
/// `due_date` is a calendar date; the stored timestamp is normalized to
/// the end of that day so "due today" stays due until midnight.
#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub parent_task_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for the edit dialog. Descriptive fields only; status and position
/// change exclusively through the board move operation.
#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub assignee_id: Option<DbId>,
    pub tags: Option<Vec<String>>,
}

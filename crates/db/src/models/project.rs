//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasklane_core::types::{DbId, Timestamp};

/// A row from the `projects` table.
///
/// `status` and `priority` are stored as TEXT with CHECK constraints;
/// `priority` uses the same low/medium/high scale as tasks.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub client_id: Option<DbId>,
    pub due_date: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `project_members` junction table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMember {
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub client_id: Option<DbId>,
    pub due_date: Option<Timestamp>,
}

/// DTO for updating a project. All fields optional; absent fields are kept.
#[derive(Debug, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub client_id: Option<DbId>,
    pub due_date: Option<Timestamp>,
}

//! Repository for the `subtasks` table.

use sqlx::PgPool;
use tasklane_core::types::DbId;

use crate::models::subtask::Subtask;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, content, completed, position, created_at, updated_at";

/// Provides operations for task-owned subtasks.
pub struct SubtaskRepo;

impl SubtaskRepo {
    /// Append a subtask to a task's checklist.
    pub async fn create(
        pool: &PgPool,
        task_id: DbId,
        content: &str,
    ) -> Result<Subtask, sqlx::Error> {
        let query = format!(
            "INSERT INTO subtasks (task_id, content, position)
             VALUES ($1, $2,
                 (SELECT COALESCE(MAX(position) + 1, 0) FROM subtasks WHERE task_id = $1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(task_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// List a task's subtasks in checklist order.
    pub async fn list_for_task(pool: &PgPool, task_id: DbId) -> Result<Vec<Subtask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subtasks WHERE task_id = $1 ORDER BY position, id"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// Subtasks for a set of tasks in one query, ordered within each task.
    /// Used when assembling a full board projection.
    pub async fn list_for_tasks(
        pool: &PgPool,
        task_ids: &[DbId],
    ) -> Result<Vec<Subtask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subtasks
             WHERE task_id = ANY($1)
             ORDER BY task_id, position, id"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(task_ids)
            .fetch_all(pool)
            .await
    }

    /// Flip a subtask's completed flag.
    ///
    /// Returns `false` when no such subtask exists under the task — the
    /// row may have been concurrently deleted, and the toggle is then a
    /// silent no-op rather than an error.
    pub async fn toggle(pool: &PgPool, task_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE subtasks SET completed = NOT completed, updated_at = NOW()
             WHERE id = $1 AND task_id = $2",
        )
        .bind(id)
        .bind(task_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a subtask. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, task_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subtasks WHERE id = $1 AND task_id = $2")
            .bind(id)
            .bind(task_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

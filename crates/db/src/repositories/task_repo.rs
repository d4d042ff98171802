//! Repository for the `tasks` and `task_tags` tables.
//!
//! Besides plain CRUD this owns the two board-specific operations: the
//! ordered projection read (`list_board`) and the move write
//! (`apply_move`), which changes the moved task's status and position in
//! one row write and then re-numbers displaced peers row by row. There is
//! no multi-row transaction: the store remains readable mid-move and any
//! session that re-synchronizes sees the store's order as final.

use sqlx::PgPool;
use tasklane_core::types::{DbId, Timestamp};

use crate::models::task::Task;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, status, priority, due_date, position, \
                       parent_task_id, project_id, assignee_id, created_by, \
                       created_at, updated_at";

/// Provides CRUD and board operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task at the end of its column.
    ///
    /// The position subquery appends to the `(project, status)` column so
    /// new cards land below existing ones. `status` and `priority` must
    /// already be validated strings.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: Option<&str>,
        status: &str,
        priority: &str,
        due_date: Option<Timestamp>,
        parent_task_id: Option<DbId>,
        project_id: Option<DbId>,
        assignee_id: Option<DbId>,
        created_by: Option<DbId>,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                 (title, description, status, priority, due_date, position,
                  parent_task_id, project_id, assignee_id, created_by)
             VALUES ($1, $2, $3, $4, $5,
                 (SELECT COALESCE(MAX(position) + 1, 0) FROM tasks
                   WHERE project_id IS NOT DISTINCT FROM $7 AND status = $3),
                 $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(title)
            .bind(description)
            .bind(status)
            .bind(priority)
            .bind(due_date)
            .bind(parent_task_id)
            .bind(project_id)
            .bind(assignee_id)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The board read: every task in a project's board, ordered by
    /// `(status, position)` so the projection can be built in one pass.
    pub async fn list_board(
        pool: &PgPool,
        project_id: Option<DbId>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id IS NOT DISTINCT FROM $1
             ORDER BY status, position, id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite descriptive fields from the edit dialog. Status and
    /// position are deliberately not touched here; those belong to
    /// [`TaskRepo::apply_move`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        title: Option<&str>,
        description: Option<&str>,
        priority: Option<&str>,
        due_date: Option<Timestamp>,
        assignee_id: Option<DbId>,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                 title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 priority = COALESCE($4, priority),
                 due_date = COALESCE($5, due_date),
                 assignee_id = COALESCE($6, assignee_id),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(title)
            .bind(description)
            .bind(priority)
            .bind(due_date)
            .bind(assignee_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task. Subtasks, tags, attachments, comments and child
    /// tasks cascade. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Persist one applied move.
    ///
    /// The moved task's status and position change together in a single
    /// UPDATE, so its column membership and order agree at every point.
    /// Displaced peers are then re-numbered independently; unchanged rows
    /// are skipped. Returns `false` if the moved task no longer exists
    /// (concurrently deleted).
    pub async fn apply_move(
        pool: &PgPool,
        task_id: DbId,
        new_status: Option<&str>,
        positions: &[(DbId, i32)],
    ) -> Result<bool, sqlx::Error> {
        let moved_position = positions
            .iter()
            .find(|(id, _)| *id == task_id)
            .map(|(_, pos)| *pos);

        let Some(moved_position) = moved_position else {
            return Ok(false);
        };

        let result = sqlx::query(
            "UPDATE tasks SET
                 status = COALESCE($2, status),
                 position = $3,
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(task_id)
        .bind(new_status)
        .bind(moved_position)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        for &(id, position) in positions {
            if id == task_id {
                continue;
            }
            sqlx::query(
                "UPDATE tasks SET position = $2, updated_at = NOW()
                 WHERE id = $1 AND position <> $2",
            )
            .bind(id)
            .bind(position)
            .execute(pool)
            .await?;
        }

        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    /// Replace a task's tag set. Tags must already be normalized and
    /// deduplicated.
    pub async fn replace_tags(
        pool: &PgPool,
        task_id: DbId,
        tags: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM task_tags WHERE task_id = $1")
            .bind(task_id)
            .execute(pool)
            .await?;

        for tag in tags {
            sqlx::query(
                "INSERT INTO task_tags (task_id, tag) VALUES ($1, $2)
                 ON CONFLICT (task_id, tag) DO NOTHING",
            )
            .bind(task_id)
            .bind(tag)
            .execute(pool)
            .await?;
        }

        Ok(())
    }

    /// List a task's tags in insertion order.
    pub async fn tags_for(pool: &PgPool, task_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT tag FROM task_tags WHERE task_id = $1 ORDER BY created_at, tag",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }

    /// Tags for a set of tasks in one query, as `(task_id, tag)` pairs.
    /// Used when assembling a full board projection.
    pub async fn tags_for_many(
        pool: &PgPool,
        task_ids: &[DbId],
    ) -> Result<Vec<(DbId, String)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, String)>(
            "SELECT task_id, tag FROM task_tags
             WHERE task_id = ANY($1)
             ORDER BY task_id, created_at, tag",
        )
        .bind(task_ids)
        .fetch_all(pool)
        .await
    }
}

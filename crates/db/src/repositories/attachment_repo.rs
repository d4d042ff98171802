//! Repository for the `attachments` table (metadata only).

use sqlx::PgPool;
use tasklane_core::types::DbId;

use crate::models::attachment::Attachment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, file_name, content_type, size_bytes, storage_key, \
                       uploaded_by, created_at";

/// Provides operations for task attachment metadata.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Register an attachment on a task.
    pub async fn create(
        pool: &PgPool,
        task_id: DbId,
        file_name: &str,
        content_type: Option<&str>,
        size_bytes: Option<i64>,
        storage_key: &str,
        uploaded_by: Option<DbId>,
    ) -> Result<Attachment, sqlx::Error> {
        let query = format!(
            "INSERT INTO attachments
                 (task_id, file_name, content_type, size_bytes, storage_key, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(task_id)
            .bind(file_name)
            .bind(content_type)
            .bind(size_bytes)
            .bind(storage_key)
            .bind(uploaded_by)
            .fetch_one(pool)
            .await
    }

    /// List a task's attachments, oldest first.
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attachments WHERE task_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an attachment record. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, task_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attachments WHERE id = $1 AND task_id = $2")
            .bind(id)
            .bind(task_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `expenses` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use tasklane_core::types::DbId;

use crate::models::expense::{Expense, UpdateExpense};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, description, amount_cents, incurred_on, \
                       created_by, created_at, updated_at";

/// Provides CRUD operations for project expenses.
pub struct ExpenseRepo;

impl ExpenseRepo {
    /// Record an expense against a project.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        description: &str,
        amount_cents: i64,
        incurred_on: Option<NaiveDate>,
        created_by: Option<DbId>,
    ) -> Result<Expense, sqlx::Error> {
        let query = format!(
            "INSERT INTO expenses (project_id, description, amount_cents, incurred_on, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(project_id)
            .bind(description)
            .bind(amount_cents)
            .bind(incurred_on)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// List a project's expenses, most recent first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM expenses
             WHERE project_id = $1
             ORDER BY incurred_on DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update an expense. Returns `None` if no such expense exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!(
            "UPDATE expenses SET
                 description = COALESCE($2, description),
                 amount_cents = COALESCE($3, amount_cents),
                 incurred_on = COALESCE($4, incurred_on),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(input.description.as_deref())
            .bind(input.amount_cents)
            .bind(input.incurred_on)
            .fetch_optional(pool)
            .await
    }

    /// Delete an expense. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

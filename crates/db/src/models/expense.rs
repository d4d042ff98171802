//! Expense entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasklane_core::types::{DbId, Timestamp};

/// A row from the `expenses` table. Amounts are integer cents.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Expense {
    pub id: DbId,
    pub project_id: DbId,
    pub description: String,
    pub amount_cents: i64,
    pub incurred_on: Option<NaiveDate>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an expense against a project.
#[derive(Debug, Deserialize)]
pub struct CreateExpense {
    pub description: String,
    pub amount_cents: i64,
    pub incurred_on: Option<NaiveDate>,
}

/// DTO for updating an expense.
#[derive(Debug, Deserialize)]
pub struct UpdateExpense {
    pub description: Option<String>,
    pub amount_cents: Option<i64>,
    pub incurred_on: Option<NaiveDate>,
}

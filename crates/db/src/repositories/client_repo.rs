//! Repository for the `clients` table.

use sqlx::PgPool;
use tasklane_core::types::DbId;

use crate::models::client::{Client, UpdateClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, email, phone, company, notes, created_by, created_at, updated_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        company: Option<&str>,
        notes: Option<&str>,
        created_by: Option<DbId>,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, email, phone, company, notes, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(name)
            .bind(email)
            .bind(phone)
            .bind(company)
            .bind(notes)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a client by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all clients ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY name, id");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// Update a client's fields. Returns `None` if no such client exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                 name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 phone = COALESCE($4, phone),
                 company = COALESCE($5, company),
                 notes = COALESCE($6, notes),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.email.as_deref())
            .bind(input.phone.as_deref())
            .bind(input.company.as_deref())
            .bind(input.notes.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a client. Projects referencing it keep their rows with a
    /// cleared `client_id`. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

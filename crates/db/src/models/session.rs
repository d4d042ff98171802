//! Login-token and session models for the magic-link auth flow.
//!
//! Only SHA-256 hashes of the opaque tokens are stored; the plaintext
//! token exists only in the sign-in email and the client's memory.

use serde::Serialize;
use sqlx::FromRow;
use tasklane_core::types::{DbId, Timestamp};

/// A row from the `login_tokens` table: one single-use emailed token.
#[derive(Debug, Clone, FromRow)]
pub struct LoginToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub consumed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub revoked: bool,
    pub created_at: Timestamp,
}

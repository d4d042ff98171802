use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// The API layer maps each variant onto an HTTP status; see
/// `tasklane-api::error::AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced entity does not exist (or was concurrently deleted).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A field-level constraint was violated. The mutation is rejected
    /// with no partial state change.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with current state (e.g. a stale board view).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not permitted.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

//! Route definitions for magic-link authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /magic-link  -> request_magic_link (public)
/// POST /verify      -> verify (public)
/// GET  /me          -> me (requires session)
/// POST /logout      -> logout (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/magic-link", post(auth::request_magic_link))
        .route("/verify", post(auth::verify))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
}

//! Route definitions for the board projection.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::board;
use crate::state::AppState;

/// Routes mounted at `/board`.
///
/// ```text
/// GET  /       -> get_board (?project_id=N scopes to one project)
/// POST /move   -> move_task (drag gesture)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(board::get_board))
        .route("/move", post(board::move_task))
}

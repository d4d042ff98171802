//! Route definitions for the `/tasks` resource.
//!
//! Also nests subtasks, comments, and attachment metadata under
//! `/tasks/{task_id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{attachments, comments, tasks};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// POST   /                                   -> create
/// GET    /{id}                               -> get_by_id
/// PUT    /{id}                               -> update
/// DELETE /{id}                               -> delete
///
/// GET    /{task_id}/subtasks                 -> list_subtasks
/// POST   /{task_id}/subtasks                 -> create_subtask
/// POST   /{task_id}/subtasks/{id}/toggle     -> toggle_subtask
/// DELETE /{task_id}/subtasks/{id}            -> delete_subtask
///
/// GET    /{task_id}/comments                 -> list
/// POST   /{task_id}/comments                 -> create
/// DELETE /{task_id}/comments/{id}            -> delete
///
/// GET    /{task_id}/attachments              -> list
/// POST   /{task_id}/attachments              -> create
/// DELETE /{task_id}/attachments/{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(tasks::create))
        .route(
            "/{id}",
            get(tasks::get_by_id)
                .put(tasks::update)
                .delete(tasks::delete),
        )
        .route(
            "/{task_id}/subtasks",
            get(tasks::list_subtasks).post(tasks::create_subtask),
        )
        .route("/{task_id}/subtasks/{id}/toggle", post(tasks::toggle_subtask))
        .route(
            "/{task_id}/subtasks/{id}",
            axum::routing::delete(tasks::delete_subtask),
        )
        .route(
            "/{task_id}/comments",
            get(comments::list).post(comments::create),
        )
        .route(
            "/{task_id}/comments/{id}",
            axum::routing::delete(comments::delete),
        )
        .route(
            "/{task_id}/attachments",
            get(attachments::list).post(attachments::create),
        )
        .route(
            "/{task_id}/attachments/{id}",
            axum::routing::delete(attachments::delete),
        )
}

//! Route definitions for the `/projects` resource.
//!
//! Also nests membership and expense routes under
//! `/projects/{project_id}/...`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{expenses, projects};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
/// GET    /{id}                               -> get_by_id
/// PUT    /{id}                               -> update
/// DELETE /{id}                               -> delete
///
/// GET    /{project_id}/members               -> list_members
/// POST   /{project_id}/members               -> add_member
/// DELETE /{project_id}/members/{user_id}     -> remove_member
///
/// GET    /{project_id}/expenses              -> list
/// POST   /{project_id}/expenses              -> create
/// PUT    /{project_id}/expenses/{id}         -> update
/// DELETE /{project_id}/expenses/{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route(
            "/{project_id}/members",
            get(projects::list_members).post(projects::add_member),
        )
        .route(
            "/{project_id}/members/{user_id}",
            axum::routing::delete(projects::remove_member),
        )
        .route(
            "/{project_id}/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/{project_id}/expenses/{id}",
            axum::routing::put(expenses::update).delete(expenses::delete),
        )
}

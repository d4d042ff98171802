pub mod auth;
pub mod board;
pub mod clients;
pub mod health;
pub mod projects;
pub mod tasks;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                        change-feed WebSocket
///
/// /auth/magic-link                           request sign-in link (public)
/// /auth/verify                               exchange link token for session (public)
/// /auth/me                                   current user
/// /auth/logout                               revoke session
///
/// /board                                     full board projection (?project_id=N)
/// /board/move                                apply a drag gesture
///
/// /tasks                                     create
/// /tasks/{id}                                get, update, delete
/// /tasks/{task_id}/subtasks                  list, create
/// /tasks/{task_id}/subtasks/{id}/toggle      flip completion
/// /tasks/{task_id}/subtasks/{id}             delete
/// /tasks/{task_id}/comments                  list, create
/// /tasks/{task_id}/comments/{id}             delete
/// /tasks/{task_id}/attachments               list, create
/// /tasks/{task_id}/attachments/{id}          delete
///
/// /projects                                  list, create
/// /projects/{id}                             get, update, delete
/// /projects/{project_id}/members             list, add
/// /projects/{project_id}/members/{user_id}   remove
/// /projects/{project_id}/expenses            list, create
/// /projects/{project_id}/expenses/{id}       update, delete
///
/// /clients                                   list, create
/// /clients/{id}                              get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Change-feed WebSocket.
        .route("/ws", get(ws::ws_handler))
        // Magic-link authentication.
        .nest("/auth", auth::router())
        // Board projection and drag moves.
        .nest("/board", board::router())
        // Task routes (also nest subtasks, comments, attachments).
        .nest("/tasks", tasks::router())
        // Project routes (also nest members and expenses).
        .nest("/projects", projects::router())
        // Client directory.
        .nest("/clients", clients::router())
}

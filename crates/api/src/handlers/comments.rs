//! Handlers for task comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tasklane_core::error::CoreError;
use tasklane_core::task;
use tasklane_core::types::DbId;
use tasklane_db::models::comment::{Comment, CreateComment};
use tasklane_db::repositories::{CommentRepo, TaskRepo};
use tasklane_events::{ChangeEvent, ChangeKind};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tasks/{task_id}/comments
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    let comments = CommentRepo::list_for_task(&state.pool, task_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/tasks/{task_id}/comments
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    let body = task::validate_content("body", &input.body)?;

    TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))?;

    let comment = CommentRepo::create(&state.pool, task_id, Some(user.user_id), &body).await?;

    state.event_bus.publish(
        ChangeEvent::new("comment.created", "comments", ChangeKind::Insert, comment.id)
            .with_actor(user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// DELETE /api/v1/tasks/{task_id}/comments/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((task_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = CommentRepo::delete(&state.pool, task_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }));
    }

    state.event_bus.publish(
        ChangeEvent::new("comment.deleted", "comments", ChangeKind::Delete, id)
            .with_actor(user.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

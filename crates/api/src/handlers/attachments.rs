//! Handlers for task attachment metadata.
//!
//! Only descriptive metadata is managed here; the bytes live in external
//! storage addressed by `storage_key`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tasklane_core::error::CoreError;
use tasklane_core::task;
use tasklane_core::types::DbId;
use tasklane_db::models::attachment::{Attachment, CreateAttachment};
use tasklane_db::repositories::{AttachmentRepo, TaskRepo};
use tasklane_events::{ChangeEvent, ChangeKind};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tasks/{task_id}/attachments
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Attachment>>>> {
    let attachments = AttachmentRepo::list_for_task(&state.pool, task_id).await?;
    Ok(Json(DataResponse { data: attachments }))
}

/// POST /api/v1/tasks/{task_id}/attachments
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
    Json(input): Json<CreateAttachment>,
) -> AppResult<(StatusCode, Json<DataResponse<Attachment>>)> {
    let file_name = task::validate_content("file_name", &input.file_name)?;
    let storage_key = task::validate_content("storage_key", &input.storage_key)?;

    TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))?;

    let attachment = AttachmentRepo::create(
        &state.pool,
        task_id,
        &file_name,
        input.content_type.as_deref(),
        input.size_bytes,
        &storage_key,
        Some(user.user_id),
    )
    .await?;

    state.event_bus.publish(
        ChangeEvent::new(
            "attachment.created",
            "attachments",
            ChangeKind::Insert,
            attachment.id,
        )
        .with_actor(user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: attachment })))
}

/// DELETE /api/v1/tasks/{task_id}/attachments/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((task_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = AttachmentRepo::delete(&state.pool, task_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Attachment",
            id,
        }));
    }

    state.event_bus.publish(
        ChangeEvent::new("attachment.deleted", "attachments", ChangeKind::Delete, id)
            .with_actor(user.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the `/tasks` resource, including subtasks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tasklane_core::error::CoreError;
use tasklane_core::task::{self, TaskCard, TaskPriority, TaskStatus};
use tasklane_core::types::DbId;
use tasklane_db::models::subtask::{CreateSubtask, Subtask};
use tasklane_db::models::task::{CreateTask, UpdateTask};
use tasklane_db::repositories::{SubtaskRepo, TaskRepo};
use tasklane_events::{ChangeEvent, ChangeKind};

use crate::error::{AppError, AppResult};
use crate::handlers::cards;
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/tasks
///
/// Validation failures reject the whole request; no row is written. The
/// due date arrives as a calendar date and is stored as the last instant
/// of that day.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<DataResponse<TaskCard>>)> {
    let title = task::validate_content("title", &input.title)?;
    let status = match input.status.as_deref() {
        Some(s) => TaskStatus::parse(s)?,
        None => TaskStatus::Todo,
    };
    let priority = match input.priority.as_deref() {
        Some(p) => TaskPriority::parse(p)?,
        None => TaskPriority::default(),
    };
    let tags = task::normalize_tags(input.tags.iter().map(String::as_str));

    let row = TaskRepo::create(
        &state.pool,
        &title,
        input.description.as_deref(),
        status.as_str(),
        priority.as_str(),
        input.due_date.map(task::end_of_day),
        input.parent_task_id,
        input.project_id,
        input.assignee_id,
        Some(user.user_id),
    )
    .await?;

    if !tags.is_empty() {
        TaskRepo::replace_tags(&state.pool, row.id, &tags).await?;
    }

    state.event_bus.publish(
        ChangeEvent::new("task.created", "tasks", ChangeKind::Insert, row.id)
            .with_actor(user.user_id),
    );

    let card = cards::load(&state, row).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: card })))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TaskCard>>> {
    let row = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    let card = cards::load(&state, row).await?;
    Ok(Json(DataResponse { data: card }))
}

/// PUT /api/v1/tasks/{id}
///
/// Edit-dialog semantics: descriptive fields only. Status and position
/// change exclusively through the board move operation.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<DataResponse<TaskCard>>> {
    let title = input
        .title
        .as_deref()
        .map(|t| task::validate_content("title", t))
        .transpose()?;
    let priority = input
        .priority
        .as_deref()
        .map(TaskPriority::parse)
        .transpose()?;

    let row = TaskRepo::update(
        &state.pool,
        id,
        title.as_deref(),
        input.description.as_deref(),
        priority.map(TaskPriority::as_str),
        input.due_date.map(task::end_of_day),
        input.assignee_id,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    if let Some(tags) = &input.tags {
        let tags = task::normalize_tags(tags.iter().map(String::as_str));
        TaskRepo::replace_tags(&state.pool, id, &tags).await?;
    }

    state.event_bus.publish(
        ChangeEvent::new("task.updated", "tasks", ChangeKind::Update, id)
            .with_actor(user.user_id),
    );

    let card = cards::load(&state, row).await?;
    Ok(Json(DataResponse { data: card }))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }

    state.event_bus.publish(
        ChangeEvent::new("task.deleted", "tasks", ChangeKind::Delete, id)
            .with_actor(user.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Subtasks
// ---------------------------------------------------------------------------

/// Result of a toggle attempt. `toggled == false` means the subtask no
/// longer exists; the gesture is a silent no-op, not an error.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub toggled: bool,
}

/// GET /api/v1/tasks/{task_id}/subtasks
pub async fn list_subtasks(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Subtask>>>> {
    let subtasks = SubtaskRepo::list_for_task(&state.pool, task_id).await?;
    Ok(Json(DataResponse { data: subtasks }))
}

/// POST /api/v1/tasks/{task_id}/subtasks
pub async fn create_subtask(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<DbId>,
    Json(input): Json<CreateSubtask>,
) -> AppResult<(StatusCode, Json<DataResponse<Subtask>>)> {
    let content = task::validate_content("content", &input.content)?;

    // Surface a clean 404 rather than a foreign-key error.
    TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))?;

    let subtask = SubtaskRepo::create(&state.pool, task_id, &content).await?;

    state.event_bus.publish(
        ChangeEvent::new("subtask.created", "subtasks", ChangeKind::Insert, subtask.id)
            .with_actor(user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: subtask })))
}

/// POST /api/v1/tasks/{task_id}/subtasks/{id}/toggle
pub async fn toggle_subtask(
    State(state): State<AppState>,
    user: AuthUser,
    Path((task_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ToggleResponse>>> {
    let toggled = SubtaskRepo::toggle(&state.pool, task_id, id).await?;

    if toggled {
        state.event_bus.publish(
            ChangeEvent::new("subtask.toggled", "subtasks", ChangeKind::Update, id)
                .with_actor(user.user_id),
        );
    }

    Ok(Json(DataResponse {
        data: ToggleResponse { toggled },
    }))
}

/// DELETE /api/v1/tasks/{task_id}/subtasks/{id}
pub async fn delete_subtask(
    State(state): State<AppState>,
    user: AuthUser,
    Path((task_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = SubtaskRepo::delete(&state.pool, task_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Subtask",
            id,
        }));
    }

    state.event_bus.publish(
        ChangeEvent::new("subtask.deleted", "subtasks", ChangeKind::Delete, id)
            .with_actor(user.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

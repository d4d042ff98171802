//! Handlers for the `/projects` resource, including membership.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tasklane_core::error::CoreError;
use tasklane_core::task::{self, TaskPriority};
use tasklane_core::types::DbId;
use tasklane_db::models::project::{CreateProject, Project, ProjectMember, UpdateProject};
use tasklane_db::repositories::ProjectRepo;
use tasklane_events::{ChangeEvent, ChangeKind};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Project lifecycle states accepted on update.
const PROJECT_STATUSES: [&str; 4] = ["active", "on_hold", "completed", "archived"];

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let name = task::validate_content("name", &input.name)?;
    let priority = match input.priority.as_deref() {
        Some(p) => TaskPriority::parse(p)?,
        None => TaskPriority::default(),
    };

    let project = ProjectRepo::create(
        &state.pool,
        &name,
        input.description.as_deref(),
        priority.as_str(),
        input.client_id,
        input.due_date,
        Some(user.user_id),
    )
    .await?;

    // The creator is automatically a member.
    ProjectRepo::add_member(&state.pool, project.id, user.user_id, "owner").await?;

    state.event_bus.publish(
        ChangeEvent::new("project.created", "projects", ChangeKind::Insert, project.id)
            .with_actor(user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    if let Some(name) = input.name.take() {
        input.name = Some(task::validate_content("name", &name)?);
    }
    if let Some(priority) = &input.priority {
        TaskPriority::parse(priority)?;
    }
    if let Some(status) = &input.status {
        if !PROJECT_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "unknown project status: {status}"
            ))));
        }
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    state.event_bus.publish(
        ChangeEvent::new("project.updated", "projects", ChangeKind::Update, id)
            .with_actor(user.user_id),
    );

    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    state.event_bus.publish(
        ChangeEvent::new("project.deleted", "projects", ChangeKind::Delete, id)
            .with_actor(user.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// Request body for adding a project member.
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: DbId,
    pub role: Option<String>,
}

/// GET /api/v1/projects/{project_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectMember>>>> {
    let members = ProjectRepo::list_members(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/projects/{project_id}/members
pub async fn add_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<AddMemberRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectMember>>)> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let role = input.role.as_deref().unwrap_or("member");
    let member = ProjectRepo::add_member(&state.pool, project_id, input.user_id, role).await?;

    state.event_bus.publish(
        ChangeEvent::new(
            "project.member_added",
            "project_members",
            ChangeKind::Insert,
            project_id,
        )
        .with_actor(user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// DELETE /api/v1/projects/{project_id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = ProjectRepo::remove_member(&state.pool, project_id, member_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project member",
            id: member_id,
        }));
    }

    state.event_bus.publish(
        ChangeEvent::new(
            "project.member_removed",
            "project_members",
            ChangeKind::Delete,
            project_id,
        )
        .with_actor(user.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

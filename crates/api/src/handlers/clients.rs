//! Handlers for the `/clients` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tasklane_core::error::CoreError;
use tasklane_core::task;
use tasklane_core::types::DbId;
use tasklane_db::models::client::{Client, CreateClient, UpdateClient};
use tasklane_db::repositories::ClientRepo;
use tasklane_events::{ChangeEvent, ChangeKind};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<DataResponse<Client>>)> {
    let name = task::validate_content("name", &input.name)?;

    let client = ClientRepo::create(
        &state.pool,
        &name,
        input.email.as_deref(),
        input.phone.as_deref(),
        input.company.as_deref(),
        input.notes.as_deref(),
        Some(user.user_id),
    )
    .await?;

    state.event_bus.publish(
        ChangeEvent::new("client.created", "clients", ChangeKind::Insert, client.id)
            .with_actor(user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// GET /api/v1/clients
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Client>>>> {
    let clients = ClientRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Client>>> {
    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    Ok(Json(DataResponse { data: client }))
}

/// PUT /api/v1/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateClient>,
) -> AppResult<Json<DataResponse<Client>>> {
    if let Some(name) = input.name.take() {
        input.name = Some(task::validate_content("name", &name)?);
    }

    let client = ClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;

    state.event_bus.publish(
        ChangeEvent::new("client.updated", "clients", ChangeKind::Update, id)
            .with_actor(user.user_id),
    );

    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/v1/clients/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ClientRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }));
    }

    state.event_bus.publish(
        ChangeEvent::new("client.deleted", "clients", ChangeKind::Delete, id)
            .with_actor(user.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

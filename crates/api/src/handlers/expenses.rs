//! Handlers for project expenses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tasklane_core::error::CoreError;
use tasklane_core::task;
use tasklane_core::types::DbId;
use tasklane_db::models::expense::{CreateExpense, Expense, UpdateExpense};
use tasklane_db::repositories::{ExpenseRepo, ProjectRepo};
use tasklane_events::{ChangeEvent, ChangeKind};

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/expenses
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Expense>>>> {
    let expenses = ExpenseRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: expenses }))
}

/// POST /api/v1/projects/{project_id}/expenses
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateExpense>,
) -> AppResult<(StatusCode, Json<DataResponse<Expense>>)> {
    let description = task::validate_content("description", &input.description)?;
    if input.amount_cents < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "amount_cents must not be negative".into(),
        )));
    }

    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let expense = ExpenseRepo::create(
        &state.pool,
        project_id,
        &description,
        input.amount_cents,
        input.incurred_on,
        Some(user.user_id),
    )
    .await?;

    state.event_bus.publish(
        ChangeEvent::new("expense.created", "expenses", ChangeKind::Insert, expense.id)
            .with_actor(user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: expense })))
}

/// PUT /api/v1/projects/{project_id}/expenses/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateExpense>,
) -> AppResult<Json<DataResponse<Expense>>> {
    if let Some(amount) = input.amount_cents {
        if amount < 0 {
            return Err(AppError::Core(CoreError::Validation(
                "amount_cents must not be negative".into(),
            )));
        }
    }

    let expense = ExpenseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Expense",
            id,
        }))?;

    state.event_bus.publish(
        ChangeEvent::new("expense.updated", "expenses", ChangeKind::Update, id)
            .with_actor(user.user_id),
    );

    Ok(Json(DataResponse { data: expense }))
}

/// DELETE /api/v1/projects/{project_id}/expenses/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((_project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = ExpenseRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Expense",
            id,
        }));
    }

    state.event_bus.publish(
        ChangeEvent::new("expense.deleted", "expenses", ChangeKind::Delete, id)
            .with_actor(user.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

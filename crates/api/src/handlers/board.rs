//! Handlers for the board projection and the move operation.
//!
//! The board is never stored: every read rebuilds the column projection
//! wholesale from the `tasks` table, and every move is validated against a
//! projection built from a fresh read. A move whose precondition fails
//! (the task is not at the claimed source slot) is answered 409 so the
//! client re-fetches; the store remains the single arbiter of order.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tasklane_core::board::{Board, BoardEntry, ColumnKey, MoveOutcome, MoveRequest};
use tasklane_core::error::CoreError;
use tasklane_core::task::{TaskCard, TaskStatus};
use tasklane_core::types::DbId;
use tasklane_db::models::task::Task;
use tasklane_db::repositories::TaskRepo;
use tasklane_events::{ChangeEvent, ChangeKind};

use crate::error::{AppError, AppResult};
use crate::handlers::cards;
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /board`.
#[derive(Debug, Deserialize)]
pub struct BoardParams {
    pub project_id: Option<DbId>,
}

/// One rendered column: its key, display title, and cards in order.
#[derive(Debug, Serialize)]
pub struct ColumnView {
    pub key: ColumnKey,
    pub title: &'static str,
    pub cards: Vec<TaskCard>,
}

/// The full board projection returned to clients.
#[derive(Debug, Serialize)]
pub struct BoardView {
    pub project_id: Option<DbId>,
    pub columns: Vec<ColumnView>,
}

/// Request body for `POST /board/move`: the drag gesture plus the board
/// scope it happened on.
#[derive(Debug, Deserialize)]
pub struct MoveBody {
    pub project_id: Option<DbId>,
    #[serde(flatten)]
    pub request: MoveRequest,
}

/// Outcome reported to the caller. `applied == false` means the gesture
/// was a no-op (cancelled, or dropped back onto its own slot).
#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub applied: bool,
}

fn to_entries(tasks: &[Task]) -> AppResult<Vec<BoardEntry>> {
    tasks
        .iter()
        .map(|t| {
            Ok(BoardEntry {
                id: t.id,
                status: TaskStatus::parse(&t.status)?,
                parent_task_id: t.parent_task_id,
            })
        })
        .collect()
}

/// GET /api/v1/board
pub async fn get_board(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<BoardParams>,
) -> AppResult<Json<DataResponse<BoardView>>> {
    let tasks = TaskRepo::list_board(&state.pool, params.project_id).await?;
    let board = Board::from_entries(&to_entries(&tasks)?);
    let mut cards = cards::load_many(&state, tasks).await?;

    let columns = board
        .columns()
        .iter()
        .map(|column| ColumnView {
            key: column.key,
            title: column.title,
            cards: column
                .task_ids
                .iter()
                .filter_map(|id| cards.remove(id))
                .collect(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: BoardView {
            project_id: params.project_id,
            columns,
        },
    }))
}

/// POST /api/v1/board/move
pub async fn move_task(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<MoveBody>,
) -> AppResult<Json<DataResponse<MoveResponse>>> {
    let tasks = TaskRepo::list_board(&state.pool, body.project_id).await?;
    let board = Board::from_entries(&to_entries(&tasks)?);

    let outcome = board.move_task(&body.request)?;
    let MoveOutcome::Applied { persist, .. } = outcome else {
        return Ok(Json(DataResponse {
            data: MoveResponse { applied: false },
        }));
    };

    let applied = TaskRepo::apply_move(
        &state.pool,
        persist.task_id,
        persist.new_status.map(TaskStatus::as_str),
        &persist.positions,
    )
    .await?;
    if !applied {
        // The task vanished between the read and the write.
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: persist.task_id,
        }));
    }

    state.event_bus.publish(
        ChangeEvent::new("task.moved", "tasks", ChangeKind::Update, persist.task_id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({
                "new_status": persist.new_status.map(TaskStatus::as_str),
            })),
    );

    Ok(Json(DataResponse {
        data: MoveResponse { applied: true },
    }))
}

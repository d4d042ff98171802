//! Integration tests for the board read and move persistence.
//!
//! Exercises the repository layer against a real database:
//! - Ordered board read grouped by status then position
//! - Cross-column move: status and position change together
//! - Same-column reorder keeps status and re-numbers peers densely
//! - Move of a concurrently deleted task is reported, not an error

use sqlx::PgPool;
use tasklane_core::board::{Board, BoardEntry, ColumnKey, MoveOutcome, MoveRequest};
use tasklane_core::task::TaskStatus;
use tasklane_db::models::task::Task;
use tasklane_db::repositories::{ProjectRepo, TaskRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_project(pool: &PgPool) -> i64 {
    ProjectRepo::create(pool, "Board Test", None, "medium", None, None, None)
        .await
        .unwrap()
        .id
}

async fn seed_task(pool: &PgPool, project_id: i64, title: &str, status: &str) -> Task {
    TaskRepo::create(
        pool, title, None, status, "medium", None, None,
        Some(project_id), None, None,
    )
    .await
    .unwrap()
}

fn board_from(tasks: &[Task]) -> Board {
    let entries: Vec<BoardEntry> = tasks
        .iter()
        .map(|t| BoardEntry {
            id: t.id,
            status: TaskStatus::parse(&t.status).unwrap(),
            parent_task_id: t.parent_task_id,
        })
        .collect();
    Board::from_entries(&entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn board_read_groups_and_orders(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let t1 = seed_task(&pool, project_id, "first", "todo").await;
    let t2 = seed_task(&pool, project_id, "second", "todo").await;
    let t3 = seed_task(&pool, project_id, "doing", "in_progress").await;

    // New cards append to the end of their column.
    assert_eq!(t1.position, 0);
    assert_eq!(t2.position, 1);
    assert_eq!(t3.position, 0);

    let tasks = TaskRepo::list_board(&pool, Some(project_id)).await.unwrap();
    let board = board_from(&tasks);
    assert_eq!(board.column(ColumnKey::Todo).task_ids, vec![t1.id, t2.id]);
    assert_eq!(board.column(ColumnKey::InProgress).task_ids, vec![t3.id]);
    assert!(board.column(ColumnKey::Done).task_ids.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn cross_column_move_persists_status_and_positions(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let t1 = seed_task(&pool, project_id, "t1", "todo").await;
    let t2 = seed_task(&pool, project_id, "t2", "todo").await;

    let tasks = TaskRepo::list_board(&pool, Some(project_id)).await.unwrap();
    let board = board_from(&tasks);

    let outcome = board
        .move_task(&MoveRequest {
            task_id: t1.id,
            source_column: ColumnKey::Todo,
            source_index: 0,
            dest_column: Some(ColumnKey::Done),
            dest_index: Some(0),
        })
        .unwrap();
    let MoveOutcome::Applied { persist, .. } = outcome else {
        panic!("expected an applied move");
    };

    let applied = TaskRepo::apply_move(
        &pool,
        persist.task_id,
        persist.new_status.map(|s| s.as_str()),
        &persist.positions,
    )
    .await
    .unwrap();
    assert!(applied);

    let moved = TaskRepo::find_by_id(&pool, t1.id).await.unwrap().unwrap();
    assert_eq!(moved.status, "completed");
    assert_eq!(moved.position, 0);

    // The displaced peer closed the gap.
    let peer = TaskRepo::find_by_id(&pool, t2.id).await.unwrap().unwrap();
    assert_eq!(peer.status, "todo");
    assert_eq!(peer.position, 0);

    // A fresh read round-trips the new order.
    let tasks = TaskRepo::list_board(&pool, Some(project_id)).await.unwrap();
    let board = board_from(&tasks);
    assert_eq!(board.column(ColumnKey::Todo).task_ids, vec![t2.id]);
    assert_eq!(board.column(ColumnKey::Done).task_ids, vec![t1.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn same_column_reorder_keeps_status(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let t1 = seed_task(&pool, project_id, "a", "todo").await;
    let t2 = seed_task(&pool, project_id, "b", "todo").await;
    let t3 = seed_task(&pool, project_id, "c", "todo").await;

    let tasks = TaskRepo::list_board(&pool, Some(project_id)).await.unwrap();
    let board = board_from(&tasks);

    let MoveOutcome::Applied { persist, .. } = board
        .move_task(&MoveRequest {
            task_id: t1.id,
            source_column: ColumnKey::Todo,
            source_index: 0,
            dest_column: Some(ColumnKey::Todo),
            dest_index: Some(2),
        })
        .unwrap()
    else {
        panic!("expected an applied move");
    };
    assert_eq!(persist.new_status, None);

    TaskRepo::apply_move(&pool, persist.task_id, None, &persist.positions)
        .await
        .unwrap();

    let tasks = TaskRepo::list_board(&pool, Some(project_id)).await.unwrap();
    let board = board_from(&tasks);
    assert_eq!(
        board.column(ColumnKey::Todo).task_ids,
        vec![t2.id, t3.id, t1.id]
    );
    // Positions are dense after the reorder.
    for (i, task) in tasks.iter().enumerate() {
        assert_eq!(task.position, i as i32);
        assert_eq!(task.status, "todo");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn move_of_deleted_task_reports_not_applied(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let t1 = seed_task(&pool, project_id, "gone", "todo").await;

    assert!(TaskRepo::delete(&pool, t1.id).await.unwrap());

    let applied = TaskRepo::apply_move(&pool, t1.id, Some("completed"), &[(t1.id, 0)])
        .await
        .unwrap();
    assert!(!applied);
}

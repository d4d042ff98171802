//! Board projection and move/reorder semantics.
//!
//! The board is an in-memory projection of tasks grouped by status into
//! three ordered columns. It is rebuilt wholesale from a fresh store read
//! on every change notification; the store is always the source of truth
//! and this projection is a cache.
//!
//! [`Board::move_task`] applies one drag gesture: a removal from the
//! source column and an insertion into the destination column, updating
//! the task's status when the columns differ. The operation returns a new
//! [`Board`] — affected columns are replaced, never mutated in place, so
//! the move is observably atomic to any concurrent reader — together with
//! a [`MovePersist`] intent describing the store writes that make the new
//! order durable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::task::TaskStatus;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// The fixed board columns, one per task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    Todo,
    InProgress,
    Done,
}

impl ColumnKey {
    /// All columns in display order.
    pub const ALL: [ColumnKey; 3] = [ColumnKey::Todo, ColumnKey::InProgress, ColumnKey::Done];

    /// The task status a card filed under this column must carry.
    pub fn status(self) -> TaskStatus {
        match self {
            ColumnKey::Todo => TaskStatus::Todo,
            ColumnKey::InProgress => TaskStatus::InProgress,
            ColumnKey::Done => TaskStatus::Completed,
        }
    }

    /// The column a task with the given status is filed under.
    pub fn from_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => ColumnKey::Todo,
            TaskStatus::InProgress => ColumnKey::InProgress,
            TaskStatus::Completed => ColumnKey::Done,
        }
    }

    /// Display title.
    pub fn title(self) -> &'static str {
        match self {
            ColumnKey::Todo => "To Do",
            ColumnKey::InProgress => "In Progress",
            ColumnKey::Done => "Done",
        }
    }

    fn index(self) -> usize {
        match self {
            ColumnKey::Todo => 0,
            ColumnKey::InProgress => 1,
            ColumnKey::Done => 2,
        }
    }
}

/// One ordered column. The id sequence defines on-screen position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    pub key: ColumnKey,
    pub title: &'static str,
    pub task_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Move inputs and outputs
// ---------------------------------------------------------------------------

/// One drag gesture: where the task was, and where it was dropped.
///
/// An absent destination means the gesture was cancelled (dropped outside
/// any column) and the move is a no-op.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    pub task_id: DbId,
    pub source_column: ColumnKey,
    pub source_index: usize,
    pub dest_column: Option<ColumnKey>,
    pub dest_index: Option<usize>,
}

/// Store writes that make an applied move durable.
///
/// The moved task's status and position change together in a single row
/// write; the remaining entries re-number displaced peers so positions
/// stay dense within each affected column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePersist {
    pub task_id: DbId,
    /// Set when the move crossed columns; the new status matches the
    /// destination column.
    pub new_status: Option<TaskStatus>,
    /// Dense `(task id, position)` pairs covering every row of the
    /// affected column(s), in final display order.
    pub positions: Vec<(DbId, i32)>,
}

/// Result of applying a [`MoveRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Cancelled gesture or same-slot drop: state is unchanged and
    /// nothing needs persisting.
    Unchanged,
    /// The move was applied; `board` is the replacement projection and
    /// `persist` the store writes it implies.
    Applied { board: Board, persist: MovePersist },
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A row of the projection read, already ordered by `(status, position)`.
#[derive(Debug, Clone)]
pub struct BoardEntry {
    pub id: DbId,
    pub status: TaskStatus,
    pub parent_task_id: Option<DbId>,
}

/// The column → ordered-task-list projection, plus the parent/child
/// adjacency index built once per rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: [BoardColumn; 3],
    /// parent task id → ordered child task ids. Rebuilt with the
    /// projection so hierarchy lookups avoid repeated linear scans.
    children: HashMap<DbId, Vec<DbId>>,
}

impl Board {
    /// An empty board with all three columns present.
    pub fn empty() -> Self {
        Self {
            columns: ColumnKey::ALL.map(|key| BoardColumn {
                key,
                title: key.title(),
                task_ids: Vec::new(),
            }),
            children: HashMap::new(),
        }
    }

    /// Build the projection from a fresh store read.
    ///
    /// `entries` must already be sorted by `(status, position)`; each entry
    /// is appended to its status column in encounter order, and child tasks
    /// are indexed under their parent in the same order.
    pub fn from_entries(entries: &[BoardEntry]) -> Self {
        let mut board = Self::empty();
        for entry in entries {
            let key = ColumnKey::from_status(entry.status);
            board.columns[key.index()].task_ids.push(entry.id);
            if let Some(parent) = entry.parent_task_id {
                board.children.entry(parent).or_default().push(entry.id);
            }
        }
        board
    }

    /// The column for the given key.
    pub fn column(&self, key: ColumnKey) -> &BoardColumn {
        &self.columns[key.index()]
    }

    /// All three columns in display order.
    pub fn columns(&self) -> &[BoardColumn; 3] {
        &self.columns
    }

    /// Ordered child ids for a parent task, empty if it has none.
    pub fn children_of(&self, parent_id: DbId) -> &[DbId] {
        self.children.get(&parent_id).map_or(&[], Vec::as_slice)
    }

    /// Every task id on the board, column by column.
    pub fn task_ids(&self) -> Vec<DbId> {
        self.columns
            .iter()
            .flat_map(|c| c.task_ids.iter().copied())
            .collect()
    }

    /// Apply one drag gesture, returning the replacement projection and
    /// its persistence intent.
    ///
    /// Precondition: the source column holds `task_id` at `source_index`.
    /// A mismatch means the caller's view is stale (a concurrent move or
    /// delete won) and the request is rejected with `Conflict`; the caller
    /// must rebuild from a fresh read. An absent destination, or a drop
    /// back onto the task's own slot, leaves the state untouched.
    pub fn move_task(&self, req: &MoveRequest) -> Result<MoveOutcome, CoreError> {
        let (Some(dest_column), Some(dest_index)) = (req.dest_column, req.dest_index) else {
            return Ok(MoveOutcome::Unchanged);
        };

        let source = self.column(req.source_column);
        if source.task_ids.get(req.source_index) != Some(&req.task_id) {
            return Err(CoreError::Conflict(format!(
                "task {} is not at {}[{}]; the board view is stale",
                req.task_id,
                req.source_column.title(),
                req.source_index,
            )));
        }

        let mut board = self.clone();

        if req.source_column == dest_column {
            // Pure reorder: splice within one list, status unchanged.
            let mut ids = source.task_ids.clone();
            ids.remove(req.source_index);
            let insert_at = dest_index.min(ids.len());
            if insert_at == req.source_index {
                return Ok(MoveOutcome::Unchanged);
            }
            ids.insert(insert_at, req.task_id);
            board.columns[dest_column.index()].task_ids = ids;
        } else {
            // Cross-column move: remove from source, insert into
            // destination, status follows the destination column.
            let mut source_ids = source.task_ids.clone();
            source_ids.remove(req.source_index);
            let mut dest_ids = self.column(dest_column).task_ids.clone();
            let insert_at = dest_index.min(dest_ids.len());
            dest_ids.insert(insert_at, req.task_id);
            board.columns[req.source_column.index()].task_ids = source_ids;
            board.columns[dest_column.index()].task_ids = dest_ids;
        }

        let new_status = (req.source_column != dest_column).then(|| dest_column.status());

        let mut positions = Vec::new();
        board.append_positions(dest_column, &mut positions);
        if req.source_column != dest_column {
            board.append_positions(req.source_column, &mut positions);
        }

        Ok(MoveOutcome::Applied {
            board,
            persist: MovePersist {
                task_id: req.task_id,
                new_status,
                positions,
            },
        })
    }

    fn append_positions(&self, key: ColumnKey, out: &mut Vec<(DbId, i32)>) {
        for (i, id) in self.column(key).task_ids.iter().enumerate() {
            out.push((*id, i as i32));
        }
    }

    /// Verify the structural invariants: no duplicate ids within or
    /// across columns. Intended for tests and debug assertions.
    pub fn check_invariants(&self) -> Result<(), CoreError> {
        let ids = self.task_ids();
        let mut seen = std::collections::HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(*id) {
                return Err(CoreError::Internal(format!(
                    "task {id} appears more than once on the board"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: DbId, status: TaskStatus) -> BoardEntry {
        BoardEntry {
            id,
            status,
            parent_task_id: None,
        }
    }

    /// todo=[1,2], inProgress=[3], done=[]
    fn sample_board() -> Board {
        Board::from_entries(&[
            entry(1, TaskStatus::Todo),
            entry(2, TaskStatus::Todo),
            entry(3, TaskStatus::InProgress),
        ])
    }

    fn move_req(
        task_id: DbId,
        source: ColumnKey,
        source_index: usize,
        dest: ColumnKey,
        dest_index: usize,
    ) -> MoveRequest {
        MoveRequest {
            task_id,
            source_column: source,
            source_index,
            dest_column: Some(dest),
            dest_index: Some(dest_index),
        }
    }

    fn apply(board: &Board, req: &MoveRequest) -> (Board, MovePersist) {
        match board.move_task(req).expect("move should apply") {
            MoveOutcome::Applied { board, persist } => (board, persist),
            MoveOutcome::Unchanged => panic!("expected an applied move"),
        }
    }

    // -- Projection build --

    #[test]
    fn from_entries_groups_by_status_in_order() {
        let board = sample_board();
        assert_eq!(board.column(ColumnKey::Todo).task_ids, vec![1, 2]);
        assert_eq!(board.column(ColumnKey::InProgress).task_ids, vec![3]);
        assert!(board.column(ColumnKey::Done).task_ids.is_empty());
    }

    #[test]
    fn from_entries_builds_adjacency_index() {
        let board = Board::from_entries(&[
            entry(1, TaskStatus::Todo),
            BoardEntry {
                id: 2,
                status: TaskStatus::Todo,
                parent_task_id: Some(1),
            },
            BoardEntry {
                id: 3,
                status: TaskStatus::InProgress,
                parent_task_id: Some(1),
            },
        ]);
        assert_eq!(board.children_of(1), &[2, 3]);
        assert!(board.children_of(2).is_empty());
    }

    // -- Cancelled and degenerate gestures --

    #[test]
    fn absent_destination_is_noop() {
        let board = sample_board();
        let req = MoveRequest {
            task_id: 1,
            source_column: ColumnKey::Todo,
            source_index: 0,
            dest_column: None,
            dest_index: None,
        };
        assert_eq!(board.move_task(&req).unwrap(), MoveOutcome::Unchanged);
    }

    #[test]
    fn move_to_own_index_is_noop() {
        let board = sample_board();
        let req = move_req(1, ColumnKey::Todo, 0, ColumnKey::Todo, 0);
        assert_eq!(board.move_task(&req).unwrap(), MoveOutcome::Unchanged);
    }

    // -- Same-column reorder --

    #[test]
    fn reorder_within_column_keeps_status() {
        let board = sample_board();
        let (after, persist) = apply(&board, &move_req(1, ColumnKey::Todo, 0, ColumnKey::Todo, 1));

        assert_eq!(after.column(ColumnKey::Todo).task_ids, vec![2, 1]);
        assert_eq!(persist.new_status, None);
        assert_eq!(persist.positions, vec![(2, 0), (1, 1)]);
        // Untouched columns are carried over as-is.
        assert_eq!(after.column(ColumnKey::InProgress).task_ids, vec![3]);
    }

    // -- Cross-column move --

    #[test]
    fn cross_column_move_sets_destination_status() {
        // Spec scenario: todo=[T1,T2], done=[] ; move T1 to done[0].
        let board = Board::from_entries(&[entry(1, TaskStatus::Todo), entry(2, TaskStatus::Todo)]);
        let (after, persist) = apply(&board, &move_req(1, ColumnKey::Todo, 0, ColumnKey::Done, 0));

        assert_eq!(after.column(ColumnKey::Todo).task_ids, vec![2]);
        assert_eq!(after.column(ColumnKey::Done).task_ids, vec![1]);
        assert_eq!(persist.new_status, Some(TaskStatus::Completed));
        // Both affected columns are re-numbered densely.
        assert_eq!(persist.positions, vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn dest_index_beyond_length_clamps_to_end() {
        let board = sample_board();
        let (after, _) = apply(&board, &move_req(1, ColumnKey::Todo, 0, ColumnKey::Done, 99));
        assert_eq!(after.column(ColumnKey::Done).task_ids, vec![1]);
    }

    // -- Precondition --

    #[test]
    fn stale_source_slot_is_a_conflict() {
        let board = sample_board();
        // Task 2 is at todo[1], not todo[0].
        let err = board
            .move_task(&move_req(2, ColumnKey::Todo, 0, ColumnKey::Done, 0))
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn original_board_is_untouched_by_a_move() {
        let board = sample_board();
        let before = board.clone();
        let _ = apply(&board, &move_req(1, ColumnKey::Todo, 0, ColumnKey::Done, 0));
        assert_eq!(board, before);
    }

    // -- Invariants over move sequences --

    #[test]
    fn moves_never_duplicate_or_drop_tasks() {
        let mut board = Board::from_entries(&[
            entry(1, TaskStatus::Todo),
            entry(2, TaskStatus::Todo),
            entry(3, TaskStatus::Todo),
            entry(4, TaskStatus::InProgress),
            entry(5, TaskStatus::Completed),
        ]);
        let mut all_ids = board.task_ids();
        all_ids.sort_unstable();

        let gestures = [
            move_req(1, ColumnKey::Todo, 0, ColumnKey::Done, 0),
            move_req(4, ColumnKey::InProgress, 0, ColumnKey::Todo, 1),
            move_req(2, ColumnKey::Todo, 0, ColumnKey::Todo, 2),
            move_req(5, ColumnKey::Done, 1, ColumnKey::InProgress, 0),
            move_req(3, ColumnKey::Todo, 1, ColumnKey::Done, 5),
        ];

        for req in &gestures {
            let (next, persist) = apply(&board, req);
            next.check_invariants().expect("no duplicates after a move");

            let mut ids = next.task_ids();
            ids.sort_unstable();
            assert_eq!(ids, all_ids, "the union of all columns is preserved");

            // Every task in an affected column got a dense position.
            let mut by_column_len = 0;
            if let Some(dest) = req.dest_column {
                by_column_len += next.column(dest).task_ids.len();
                if dest != req.source_column {
                    by_column_len += next.column(req.source_column).task_ids.len();
                }
            }
            assert_eq!(persist.positions.len(), by_column_len);

            board = next;
        }
    }

    // -- Column/status mapping --

    #[test]
    fn column_and_status_map_one_to_one() {
        for key in ColumnKey::ALL {
            assert_eq!(ColumnKey::from_status(key.status()), key);
        }
    }
}

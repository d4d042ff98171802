//! Task (card) attributes, validation, and due-date rules.
//!
//! Field-level constraints are enforced here so every caller — HTTP
//! handlers, repositories, tests — rejects a bad mutation the same way,
//! with no partial state change.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status / priority enums
// ---------------------------------------------------------------------------

/// Task workflow status. Stored as TEXT in the `tasks` table; the string
/// forms below are the canonical wire and storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Canonical storage string (`todo`, `in_progress`, `completed`).
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Parse a storage string back into a status.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(CoreError::Validation(format!(
                "Invalid task status '{other}'. Must be one of: todo, in_progress, completed"
            ))),
        }
    }
}

/// Task priority. Defaults to `Medium` when the client omits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    /// Canonical storage string (`low`, `medium`, `high`).
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Parse a storage string back into a priority.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(CoreError::Validation(format!(
                "Invalid task priority '{other}'. Must be one of: low, medium, high"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate free-text content (task title, subtask content).
///
/// Returns the trimmed string, or a `Validation` error if it is empty
/// after trimming.
pub fn validate_content(field: &'static str, content: &str) -> Result<String, CoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Normalize a tag list: trim each tag, drop tags that are empty after
/// trimming, and de-duplicate case-sensitively keeping the first
/// occurrence.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::new();
    for tag in tags {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if !seen.iter().any(|t: &String| t == trimmed) {
            seen.push(trimmed.to_string());
        }
    }
    seen
}

// ---------------------------------------------------------------------------
// Due dates
// ---------------------------------------------------------------------------

/// Normalize a calendar date to the end of that day (23:59:59.999 UTC),
/// so "due today" comparisons include the entire day.
pub fn end_of_day(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::milliseconds(1)
}

/// Derived urgency of a due date relative to "now".
///
/// This is a pure function of its two inputs and is recomputed on every
/// read — "now" advances, so the value must never be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueDateStatus {
    Overdue,
    DueToday,
    /// Due within the next three days.
    Upcoming,
    Future,
}

/// Days within which a due date counts as [`DueDateStatus::Upcoming`].
const UPCOMING_WINDOW_DAYS: i64 = 3;

/// Classify a due date by the whole-day difference between it and `now`.
pub fn due_date_status(due: DateTime<Utc>, now: DateTime<Utc>) -> DueDateStatus {
    let days = (due.date_naive() - now.date_naive()).num_days();
    if days < 0 {
        DueDateStatus::Overdue
    } else if days == 0 {
        DueDateStatus::DueToday
    } else if days <= UPCOMING_WINDOW_DAYS {
        DueDateStatus::Upcoming
    } else {
        DueDateStatus::Future
    }
}

// ---------------------------------------------------------------------------
// Subtasks and cards
// ---------------------------------------------------------------------------

/// One subtask, owned exclusively by its parent task and deleted with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: DbId,
    pub content: String,
    pub completed: bool,
}

/// Toggle the `completed` flag of the subtask with the given id.
///
/// Returns `false` without touching the list when the id is unknown —
/// the subtask may have been concurrently deleted, so this is a silent
/// no-op rather than an error.
pub fn toggle_subtask(subtasks: &mut [Subtask], subtask_id: DbId) -> bool {
    match subtasks.iter_mut().find(|s| s.id == subtask_id) {
        Some(subtask) => {
            subtask.completed = !subtask.completed;
            true
        }
        None => false,
    }
}

/// One task as presented on the board: the row attributes plus owned
/// subtasks and tags, assembled per projection rebuild.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCard {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<Timestamp>,
    pub position: i32,
    pub parent_task_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    pub tags: Vec<String>,
    pub subtasks: Vec<Subtask>,
    /// Derived from `due_date` at read time; `None` when no due date is set.
    pub due_status: Option<DueDateStatus>,
}

impl TaskCard {
    /// Recompute the derived due-date status against the given "now".
    pub fn with_due_status(mut self, now: DateTime<Utc>) -> Self {
        self.due_status = self.due_date.map(|due| due_date_status(due, now));
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

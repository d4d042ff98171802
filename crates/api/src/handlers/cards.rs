//! Assembly of board cards from their store rows.
//!
//! A card is a task row enriched with its tags and subtasks and the
//! due-date status derived at read time. Assembly happens on every read;
//! nothing derived is ever cached.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tasklane_core::task::{Subtask, TaskCard, TaskPriority, TaskStatus};
use tasklane_core::types::DbId;
use tasklane_db::models::subtask::Subtask as SubtaskRow;
use tasklane_db::models::task::Task;
use tasklane_db::repositories::{SubtaskRepo, TaskRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// Build one card from a task row and its owned rows.
pub fn assemble(
    task: Task,
    tags: Vec<String>,
    subtasks: Vec<SubtaskRow>,
    now: DateTime<Utc>,
) -> AppResult<TaskCard> {
    let card = TaskCard {
        id: task.id,
        title: task.title,
        description: task.description,
        status: TaskStatus::parse(&task.status)?,
        priority: TaskPriority::parse(&task.priority)?,
        due_date: task.due_date,
        position: task.position,
        parent_task_id: task.parent_task_id,
        project_id: task.project_id,
        assignee_id: task.assignee_id,
        tags,
        subtasks: subtasks
            .into_iter()
            .map(|s| Subtask {
                id: s.id,
                content: s.content,
                completed: s.completed,
            })
            .collect(),
        due_status: None,
    };
    Ok(card.with_due_status(now))
}

/// Load tags and subtasks for one task and build its card.
pub async fn load(state: &AppState, task: Task) -> AppResult<TaskCard> {
    let tags = TaskRepo::tags_for(&state.pool, task.id).await?;
    let subtasks = SubtaskRepo::list_for_task(&state.pool, task.id).await?;
    assemble(task, tags, subtasks, Utc::now())
}

/// Build cards for a whole task set with two bulk queries, keyed by id.
pub async fn load_many(state: &AppState, tasks: Vec<Task>) -> AppResult<HashMap<DbId, TaskCard>> {
    let ids: Vec<DbId> = tasks.iter().map(|t| t.id).collect();

    let mut tags_by_task: HashMap<DbId, Vec<String>> = HashMap::new();
    for (task_id, tag) in TaskRepo::tags_for_many(&state.pool, &ids).await? {
        tags_by_task.entry(task_id).or_default().push(tag);
    }

    let mut subtasks_by_task: HashMap<DbId, Vec<SubtaskRow>> = HashMap::new();
    for row in SubtaskRepo::list_for_tasks(&state.pool, &ids).await? {
        subtasks_by_task.entry(row.task_id).or_default().push(row);
    }

    let now = Utc::now();
    let mut cards = HashMap::with_capacity(tasks.len());
    for task in tasks {
        let id = task.id;
        let tags = tags_by_task.remove(&id).unwrap_or_default();
        let subtasks = subtasks_by_task.remove(&id).unwrap_or_default();
        cards.insert(id, assemble(task, tags, subtasks, now)?);
    }
    Ok(cards)
}

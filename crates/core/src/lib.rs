//! Tasklane domain core.
//!
//! Pure domain logic shared by the database and API layers:
//!
//! - [`board`] — the column/card board projection and its move semantics.
//! - [`task`] — task attributes, validation, subtasks, and due-date rules.
//! - [`error`] — the [`CoreError`](error::CoreError) taxonomy.
//! - [`types`] — shared primitive aliases.
//!
//! This crate performs no I/O; persistence lives in `tasklane-db` and the
//! HTTP/WebSocket surface in `tasklane-api`.

pub mod board;
pub mod error;
pub mod task;
pub mod types;

//! Row structs (database entities) and request DTOs, one module per table.

pub mod attachment;
pub mod client;
pub mod comment;
pub mod event;
pub mod expense;
pub mod project;
pub mod session;
pub mod subtask;
pub mod task;
pub mod user;

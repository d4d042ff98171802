//! HTTP handlers, one module per resource.

pub mod attachments;
pub mod auth;
pub mod board;
pub mod cards;
pub mod clients;
pub mod comments;
pub mod expenses;
pub mod projects;
pub mod tasks;

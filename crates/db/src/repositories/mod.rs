//! Table repositories: zero-sized structs with async operations over a
//! borrowed pool.

pub mod attachment_repo;
pub mod client_repo;
pub mod comment_repo;
pub mod event_repo;
pub mod expense_repo;
pub mod login_token_repo;
pub mod project_repo;
pub mod session_repo;
pub mod subtask_repo;
pub mod task_repo;
pub mod user_repo;

pub use attachment_repo::AttachmentRepo;
pub use client_repo::ClientRepo;
pub use comment_repo::CommentRepo;
pub use event_repo::EventRepo;
pub use expense_repo::ExpenseRepo;
pub use login_token_repo::LoginTokenRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use subtask_repo::SubtaskRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;

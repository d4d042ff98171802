//! Long-running background jobs.

pub mod token_cleanup;

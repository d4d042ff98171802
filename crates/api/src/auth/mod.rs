//! Magic-link authentication primitives.
//!
//! Both login tokens and session tokens are opaque random strings; only
//! their SHA-256 hash is stored server-side so a database leak does not
//! compromise active sessions or pending sign-in links.

pub mod token;

pub use token::{hash_token, new_token};

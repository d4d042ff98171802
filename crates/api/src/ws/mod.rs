//! WebSocket infrastructure for the realtime change feed.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handler used by Axum routes. Connected clients receive every
//! published change event and respond by re-fetching the affected
//! projection; the socket carries notifications, never state.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;

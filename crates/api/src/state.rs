use std::sync::Arc;

use tasklane_events::{EventBus, Mailer};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tasklane_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Centralized bus for publishing change events.
    pub event_bus: Arc<EventBus>,
    /// SMTP mailer; `None` when SMTP is not configured (the sign-in link
    /// is logged instead of emailed).
    pub mailer: Option<Arc<Mailer>>,
}

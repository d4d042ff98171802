//! Event-to-WebSocket fan-out.
//!
//! [`ChangeBroadcaster`] subscribes to the change-event bus and forwards
//! each event to every connected WebSocket client as a compact JSON frame.
//! Clients treat the frame purely as an invalidation signal: they re-fetch
//! the board projection from the store, which is the source of truth.

use std::sync::Arc;

use axum::extract::ws::{Message, Utf8Bytes};
use serde::Serialize;
use tasklane_core::types::DbId;
use tasklane_events::{ChangeEvent, ChangeKind};
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// The frame pushed to clients for each change event.
#[derive(Debug, Serialize)]
struct ChangeFrame<'a> {
    event_type: &'a str,
    table: &'a str,
    entity_id: Option<DbId>,
    kind: ChangeKind,
}

/// Forwards change events from the bus to all WebSocket connections.
pub struct ChangeBroadcaster {
    ws_manager: Arc<WsManager>,
}

impl ChangeBroadcaster {
    /// Create a new broadcaster over the given WebSocket manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the fan-out loop.
    ///
    /// Subscribes to the event bus via `receiver` and forwards each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](tasklane_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.forward(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Change broadcaster lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, change broadcaster shutting down");
                    break;
                }
            }
        }
    }

    /// Serialize one event and push it to every connection.
    async fn forward(&self, event: &ChangeEvent) {
        let frame = ChangeFrame {
            event_type: &event.event_type,
            table: &event.source_table,
            entity_id: event.entity_id,
            kind: event.kind,
        };
        match serde_json::to_string(&frame) {
            Ok(json) => {
                self.ws_manager
                    .broadcast(Message::Text(Utf8Bytes::from(json)))
                    .await;
            }
            Err(e) => {
                tracing::error!(error = %e, event_type = %event.event_type,
                    "Failed to serialize change frame");
            }
        }
    }
}

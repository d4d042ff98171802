use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::state::AppState;
use crate::ws::manager::WsManager;

/// HTTP handler that upgrades the connection to a change-feed subscription.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| subscribe(socket, state.ws_manager))
}

/// Drive one subscriber until it disconnects.
///
/// The feed is strictly one-way: outbound frames come from the manager
/// channel (change frames, heartbeat pings, the shutdown Close), while
/// inbound traffic is connection upkeep only. Both directions are
/// multiplexed on this task; when either side ends the connection is
/// deregistered.
async fn subscribe(socket: WebSocket, ws_manager: Arc<WsManager>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "Change-feed subscriber connected");

    let mut outbound = ws_manager.add(conn_id.clone()).await;
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            frame = outbound.recv() => {
                // A closed channel means the manager dropped us (shutdown
                // or replacement by a reconnect with the same id).
                let Some(frame) = frame else { break };
                if sink.send(frame).await.is_err() {
                    tracing::debug!(conn_id = %conn_id, "Subscriber sink closed");
                    break;
                }
            }
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Pong(_))) => {
                        tracing::trace!(conn_id = %conn_id, "Heartbeat pong");
                    }
                    // Clients have nothing to say on this socket.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(conn_id = %conn_id, error = %e,
                            "Subscriber receive error");
                        break;
                    }
                }
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    tracing::info!(conn_id = %conn_id, "Change-feed subscriber disconnected");
}

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::ws::manager::WsManager;

/// Spawn the background task that keeps change-feed subscribers alive.
///
/// Every `interval` (see `WS_HEARTBEAT_SECS`) a Ping frame is pushed to
/// each registered connection; idle ticks with no subscribers are skipped.
/// The task runs for the life of the server and is aborted on shutdown.
pub fn start_heartbeat(
    ws_manager: Arc<WsManager>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let subscribers = ws_manager.connection_count().await;
            if subscribers == 0 {
                continue;
            }
            tracing::debug!(subscribers, "Pinging change-feed subscribers");
            ws_manager.ping_all().await;
        }
    })
}

#[cfg(test)]
mod tests {
    use axum::extract::ws::Message;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn pings_each_subscriber_every_interval() {
        let manager = Arc::new(WsManager::new());
        let mut rx = manager.add("sub-1".to_string()).await;

        let handle = start_heartbeat(Arc::clone(&manager), Duration::from_secs(5));

        // Two full intervals; the immediate first tick finds no traffic to
        // skip since the subscriber is already registered.
        tokio::time::advance(Duration::from_secs(11)).await;

        let first = rx.recv().await;
        assert!(matches!(first, Some(Message::Ping(_))));
        let second = rx.recv().await;
        assert!(matches!(second, Some(Message::Ping(_))));

        handle.abort();
    }
}

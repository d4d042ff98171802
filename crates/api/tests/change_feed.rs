//! Tests for the realtime change feed: bus events fanning out through
//! [`ChangeBroadcaster`] to registered WebSocket subscribers.
//!
//! No HTTP upgrade happens here; subscribers are represented by the
//! receiver half of their manager channel, which is exactly what the
//! socket task drains in production.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use tasklane_api::notifications::ChangeBroadcaster;
use tasklane_api::ws::WsManager;
use tasklane_events::{ChangeEvent, ChangeKind, EventBus};

/// Parse the next frame from a subscriber channel as JSON.
async fn next_frame(rx: &mut tokio::sync::mpsc::UnboundedReceiver<Message>) -> serde_json::Value {
    let msg = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("frame arrives in time")
        .expect("channel open");
    match msg {
        Message::Text(text) => serde_json::from_str(text.as_str()).expect("frame is JSON"),
        other => panic!("expected a text frame, got {other:?}"),
    }
}

#[tokio::test]
async fn published_event_reaches_every_subscriber_as_json() {
    let manager = Arc::new(WsManager::new());
    let bus = EventBus::default();

    let mut alice = manager.add("alice".to_string()).await;
    let mut bob = manager.add("bob".to_string()).await;

    let broadcaster = ChangeBroadcaster::new(Arc::clone(&manager));
    let receiver = bus.subscribe();
    let handle = tokio::spawn(broadcaster.run(receiver));

    bus.publish(
        ChangeEvent::new("task.moved", "tasks", ChangeKind::Update, 42)
            .with_actor(7)
            .with_payload(serde_json::json!({ "new_status": "completed" })),
    );

    for rx in [&mut alice, &mut bob] {
        let frame = next_frame(rx).await;
        assert_eq!(frame["event_type"], "task.moved");
        assert_eq!(frame["table"], "tasks");
        assert_eq!(frame["entity_id"], 42);
        assert_eq!(frame["kind"], "update");
        // The frame is an invalidation signal; event payloads stay on the
        // audit side and are not pushed to clients.
        assert!(frame.get("payload").is_none());
    }

    handle.abort();
}

#[tokio::test]
async fn frames_keep_arriving_after_a_subscriber_hangs_up() {
    let manager = Arc::new(WsManager::new());
    let bus = EventBus::default();

    let gone = manager.add("gone".to_string()).await;
    let mut alive = manager.add("alive".to_string()).await;

    let handle = tokio::spawn(ChangeBroadcaster::new(Arc::clone(&manager)).run(bus.subscribe()));

    // One subscriber drops its end without deregistering, as a socket task
    // does the instant its connection dies.
    drop(gone);

    bus.publish(ChangeEvent::new(
        "task.deleted",
        "tasks",
        ChangeKind::Delete,
        3,
    ));

    let frame = next_frame(&mut alive).await;
    assert_eq!(frame["event_type"], "task.deleted");
    assert_eq!(frame["kind"], "delete");

    handle.abort();
}

#[tokio::test]
async fn broadcaster_stops_when_the_bus_is_dropped() {
    let manager = Arc::new(WsManager::new());
    let bus = EventBus::default();

    let handle = tokio::spawn(ChangeBroadcaster::new(Arc::clone(&manager)).run(bus.subscribe()));

    // Dropping the bus closes the broadcast channel, which is the shutdown
    // signal the fan-out loop honours.
    drop(bus);

    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("broadcaster exits on bus close")
        .expect("broadcaster task does not panic");
}

#[tokio::test]
async fn reconnect_with_the_same_id_replaces_the_old_subscription() {
    let manager = Arc::new(WsManager::new());
    let bus = EventBus::default();

    let _stale = manager.add("client-1".to_string()).await;
    let mut fresh = manager.add("client-1".to_string()).await;
    assert_eq!(manager.connection_count().await, 1);

    let handle = tokio::spawn(ChangeBroadcaster::new(Arc::clone(&manager)).run(bus.subscribe()));

    bus.publish(ChangeEvent::new(
        "subtask.toggled",
        "subtasks",
        ChangeKind::Update,
        9,
    ));

    let frame = next_frame(&mut fresh).await;
    assert_eq!(frame["event_type"], "subtask.toggled");

    handle.abort();
}

#[tokio::test]
async fn shutdown_closes_every_subscriber() {
    let manager = Arc::new(WsManager::new());

    let mut alice = manager.add("alice".to_string()).await;
    let mut bob = manager.add("bob".to_string()).await;

    manager.shutdown_all().await;
    assert_eq!(manager.connection_count().await, 0);

    for rx in [&mut alice, &mut bob] {
        let msg = rx.recv().await.expect("close frame delivered");
        assert!(matches!(msg, Message::Close(None)));
        // Sender side is gone with the manager entry.
        assert!(rx.recv().await.is_none());
    }
}

#[tokio::test]
async fn deregistered_subscriber_gets_no_further_frames() {
    let manager = Arc::new(WsManager::new());
    let bus = EventBus::default();

    let mut early = manager.add("early".to_string()).await;
    let handle = tokio::spawn(ChangeBroadcaster::new(Arc::clone(&manager)).run(bus.subscribe()));

    bus.publish(ChangeEvent::new(
        "client.created",
        "clients",
        ChangeKind::Insert,
        1,
    ));
    let frame = next_frame(&mut early).await;
    assert_eq!(frame["table"], "clients");

    manager.remove("early").await;
    bus.publish(ChangeEvent::new(
        "client.deleted",
        "clients",
        ChangeKind::Delete,
        1,
    ));

    // Removal dropped the sender half, so the channel drains to None
    // rather than yielding the second frame.
    assert!(early.recv().await.is_none());

    handle.abort();
}

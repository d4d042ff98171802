//! Change-event fan-out to WebSocket clients.

mod broadcaster;

pub use broadcaster::ChangeBroadcaster;

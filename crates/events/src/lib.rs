//! Change-notification infrastructure.
//!
//! Every mutation on the board publishes a [`ChangeEvent`] on the
//! in-process [`EventBus`]. Subscribers include the WebSocket fan-out
//! (clients invalidate their cached projection and re-fetch) and the
//! [`EventPersistence`] service, which writes every event to the `events`
//! audit table. Events are discrete row-level notifications with no
//! ordering guarantee across tables.
//!
//! [`mailer`] carries the SMTP delivery used for magic-link sign-in email.

pub mod bus;
pub mod mailer;
pub mod persistence;

pub use bus::{ChangeEvent, ChangeKind, EventBus};
pub use mailer::{MailConfig, MailError, Mailer};
pub use persistence::EventPersistence;

//! Studio Desk event bus and notification fan-out.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the domain event envelope published by handlers.
//! - [`NotificationWriter`]: background service turning events into
//!   per-user rows in the `notifications` table.

pub mod bus;
pub mod notifier;

pub use bus::{event_types, EventBus, PlatformEvent};
pub use notifier::{NotificationWriter, Recipients};

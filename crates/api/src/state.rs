use std::sync::Arc;

use studiodesk_events::{EventBus, PlatformEvent};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: studiodesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Event bus feeding the notification writer.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Publish a platform event. Fire-and-forget.
    pub fn publish(&self, event: PlatformEvent) {
        self.event_bus.publish(event);
    }
}

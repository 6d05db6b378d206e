//! Notification fan-out service.
//!
//! [`NotificationWriter`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and writes one `notifications` row per recipient of each event it
//! understands. It runs as a long-lived background task and exits when the
//! bus sender is dropped.

use studiodesk_core::announcements::roles_for_audience;
use studiodesk_core::roles::{ROLE_ADMIN, ROLE_MANAGER};
use studiodesk_core::types::DbId;
use studiodesk_db::models::notification::CreateNotification;
use studiodesk_db::repositories::{NotificationRepo, RoleRepo};
use studiodesk_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::{event_types, PlatformEvent};

/// Who should be told about an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    /// Every active admin and manager.
    Staff,
    /// Specific user accounts.
    Users(Vec<DbId>),
    /// Every active holder of the roles an announcement audience maps to.
    Audience(String),
}

/// Rendered notification text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub title: String,
    pub body: Option<String>,
    pub link: Option<String>,
}

/// Background service that turns platform events into notifications.
pub struct NotificationWriter;

impl NotificationWriter {
    /// Run the fan-out loop until the channel closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => match Self::deliver(&pool, &event).await {
                    Ok(0) => {}
                    Ok(count) => tracing::debug!(
                        event_type = %event.event_type,
                        count,
                        "Notifications written"
                    ),
                    Err(e) => tracing::error!(
                        error = %e,
                        event_type = %event.event_type,
                        "Failed to write notifications"
                    ),
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification writer lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification writer shutting down");
                    break;
                }
            }
        }
    }

    /// Write notifications for one event. Returns the number of rows written.
    ///
    /// The acting user is never notified about their own action.
    pub async fn deliver(pool: &DbPool, event: &PlatformEvent) -> Result<usize, sqlx::Error> {
        let (Some(recipients), Some(message)) = (recipients(event), render(event)) else {
            return Ok(0);
        };

        let mut user_ids = match recipients {
            Recipients::Staff => {
                RoleRepo::user_ids_with_roles(pool, &[ROLE_ADMIN, ROLE_MANAGER]).await?
            }
            Recipients::Users(ids) => ids,
            Recipients::Audience(audience) => {
                RoleRepo::user_ids_with_roles(pool, roles_for_audience(&audience)).await?
            }
        };
        user_ids.sort_unstable();
        user_ids.dedup();
        if let Some(actor) = event.actor_user_id {
            user_ids.retain(|&id| id != actor);
        }

        for &user_id in &user_ids {
            NotificationRepo::create(
                pool,
                &CreateNotification {
                    user_id,
                    kind: event.event_type.clone(),
                    title: message.title.clone(),
                    body: message.body.clone(),
                    link: message.link.clone(),
                },
            )
            .await?;
        }
        Ok(user_ids.len())
    }
}

/// Resolve the audience of an event, or `None` for events nobody is told about.
pub fn recipients(event: &PlatformEvent) -> Option<Recipients> {
    fn users(event: &PlatformEvent, keys: &[&str]) -> Option<Recipients> {
        let ids: Vec<DbId> = keys.iter().filter_map(|k| event.payload_id(k)).collect();
        (!ids.is_empty()).then_some(Recipients::Users(ids))
    }

    match event.event_type.as_str() {
        event_types::LEAD_SUBMITTED
        | event_types::PAYMENT_COMPLETED
        | event_types::PAUSE_REQUESTED
        | event_types::TICKET_CREATED => Some(Recipients::Staff),
        event_types::PAUSE_REVIEWED
        | event_types::PROJECT_STATUS_CHANGED => users(event, &["customer_id"]),
        event_types::DESIGNER_ASSIGNED => users(event, &["customer_id", "designer_user_id"]),
        event_types::VACATION_REVIEWED => users(event, &["designer_user_id"]),
        event_types::TICKET_REPLIED => users(event, &["user_id"]),
        event_types::ANNOUNCEMENT_PUBLISHED => event
            .payload_str("audience")
            .map(|a| Recipients::Audience(a.to_string())),
        _ => None,
    }
}

/// Build the notification text for an event.
pub fn render(event: &PlatformEvent) -> Option<Message> {
    let id = event.source_entity_id;
    let title_of = |fallback: &str| {
        event
            .payload_str("title")
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    };

    let (title, body, link) = match event.event_type.as_str() {
        event_types::LEAD_SUBMITTED => (
            "New consultation request".to_string(),
            event.payload_str("name").map(|n| format!("From {n}")),
            id.map(|id| format!("/leads/{id}")),
        ),
        event_types::PAYMENT_COMPLETED => (
            "Payment received".to_string(),
            event.payload_str("plan_name").map(|p| format!("Plan: {p}")),
            id.map(|id| format!("/payments/{id}")),
        ),
        event_types::DESIGNER_ASSIGNED => (
            "Designer assigned".to_string(),
            event
                .payload_str("designer_name")
                .map(|n| format!("{n} will work on {}", title_of("your project"))),
            id.map(|id| format!("/projects/{id}")),
        ),
        event_types::PROJECT_STATUS_CHANGED => (
            format!("Project {}", event.payload_str("status").unwrap_or("updated")),
            Some(title_of("Your project")),
            id.map(|id| format!("/projects/{id}")),
        ),
        event_types::PAUSE_REQUESTED => (
            "Hold requested".to_string(),
            Some(title_of("A project")),
            event
                .payload_id("project_id")
                .map(|p| format!("/projects/{p}/pause-requests")),
        ),
        event_types::PAUSE_REVIEWED => (
            format!("Hold request {}", event.payload_str("status").unwrap_or("reviewed")),
            event.payload_str("review_note").map(str::to_string),
            event
                .payload_id("project_id")
                .map(|p| format!("/projects/{p}/pause-requests")),
        ),
        event_types::VACATION_REVIEWED => (
            format!("Vacation request {}", event.payload_str("status").unwrap_or("reviewed")),
            None,
            Some("/vacation-requests".to_string()),
        ),
        event_types::TICKET_CREATED => (
            "New support ticket".to_string(),
            Some(title_of("Support ticket")),
            id.map(|id| format!("/tickets/{id}")),
        ),
        event_types::TICKET_REPLIED => (
            "Your ticket has a reply".to_string(),
            Some(title_of("Support ticket")),
            id.map(|id| format!("/tickets/{id}")),
        ),
        event_types::ANNOUNCEMENT_PUBLISHED => (
            title_of("New announcement"),
            None,
            Some("/announcements".to_string()),
        ),
        _ => return None,
    };
    Some(Message { title, body, link })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lead_submissions_go_to_staff() {
        let event = PlatformEvent::new(event_types::LEAD_SUBMITTED).with_source("lead", 3);
        assert_eq!(recipients(&event), Some(Recipients::Staff));
        let message = render(&event).unwrap();
        assert_eq!(message.link.as_deref(), Some("/leads/3"));
    }

    #[test]
    fn designer_assignment_reaches_both_parties() {
        let event = PlatformEvent::new(event_types::DESIGNER_ASSIGNED)
            .with_source("project", 5)
            .with_payload(json!({"customer_id": 10, "designer_user_id": 11}));
        assert_eq!(recipients(&event), Some(Recipients::Users(vec![10, 11])));
    }

    #[test]
    fn review_without_customer_has_no_recipients() {
        let event = PlatformEvent::new(event_types::PAUSE_REVIEWED);
        assert_eq!(recipients(&event), None);
    }

    #[test]
    fn announcement_uses_audience() {
        let event = PlatformEvent::new(event_types::ANNOUNCEMENT_PUBLISHED)
            .with_payload(json!({"audience": "designers", "title": "Office closed"}));
        assert_eq!(
            recipients(&event),
            Some(Recipients::Audience("designers".to_string()))
        );
        assert_eq!(render(&event).unwrap().title, "Office closed");
    }

    #[test]
    fn pause_review_title_includes_outcome() {
        let event = PlatformEvent::new(event_types::PAUSE_REVIEWED)
            .with_payload(json!({"customer_id": 1, "status": "approved", "project_id": 4}));
        let message = render(&event).unwrap();
        assert_eq!(message.title, "Hold request approved");
        assert_eq!(message.link.as_deref(), Some("/projects/4/pause-requests"));
    }

    #[test]
    fn unknown_events_are_ignored() {
        let event = PlatformEvent::new("system.tick");
        assert!(recipients(&event).is_none());
        assert!(render(&event).is_none());
    }
}

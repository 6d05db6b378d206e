//! Integration tests for notification fan-out.

use serde_json::json;
use sqlx::PgPool;
use studiodesk_core::roles::{ROLE_CUSTOMER_ID, ROLE_DESIGNER_ID, ROLE_MANAGER_ID};
use studiodesk_db::models::user::CreateUser;
use studiodesk_db::repositories::{NotificationRepo, RoleRepo, UserRepo};
use studiodesk_events::{event_types, EventBus, NotificationWriter, PlatformEvent};

async fn seed_user(pool: &PgPool, email: &str, role_id: i64) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "x".to_string(),
            display_name: email.to_string(),
            phone: None,
            company_name: None,
        },
    )
    .await
    .unwrap();
    RoleRepo::assign(pool, user.id, role_id, None).await.unwrap();
    user.id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_event_skips_actor(pool: PgPool) {
    let manager_a = seed_user(&pool, "a@example.com", ROLE_MANAGER_ID).await;
    let manager_b = seed_user(&pool, "b@example.com", ROLE_MANAGER_ID).await;
    let customer = seed_user(&pool, "c@example.com", ROLE_CUSTOMER_ID).await;

    let event = PlatformEvent::new(event_types::TICKET_CREATED)
        .with_source("ticket", 1)
        .with_actor(manager_a);
    let written = NotificationWriter::deliver(&pool, &event).await.unwrap();
    assert_eq!(written, 1);

    assert_eq!(NotificationRepo::unread_count(&pool, manager_a).await.unwrap(), 0);
    assert_eq!(NotificationRepo::unread_count(&pool, manager_b).await.unwrap(), 1);
    assert_eq!(NotificationRepo::unread_count(&pool, customer).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_announcement_reaches_only_its_audience(pool: PgPool) {
    let designer = seed_user(&pool, "d@example.com", ROLE_DESIGNER_ID).await;
    let customer = seed_user(&pool, "c@example.com", ROLE_CUSTOMER_ID).await;

    let event = PlatformEvent::new(event_types::ANNOUNCEMENT_PUBLISHED)
        .with_source("announcement", 1)
        .with_payload(json!({"audience": "customers", "title": "New plans"}));
    NotificationWriter::deliver(&pool, &event).await.unwrap();

    let rows = NotificationRepo::list_for_user(&pool, customer, false, 10, 0)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "New plans");
    assert_eq!(rows[0].kind, event_types::ANNOUNCEMENT_PUBLISHED);
    assert_eq!(NotificationRepo::unread_count(&pool, designer).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_run_loop_drains_until_bus_dropped(pool: PgPool) {
    let customer = seed_user(&pool, "c@example.com", ROLE_CUSTOMER_ID).await;

    let bus = EventBus::default();
    let handle = tokio::spawn(NotificationWriter::run(pool.clone(), bus.subscribe()));

    bus.publish(
        PlatformEvent::new(event_types::TICKET_REPLIED)
            .with_source("ticket", 9)
            .with_payload(json!({"user_id": customer})),
    );
    drop(bus);
    handle.await.unwrap();

    let rows = NotificationRepo::list_for_user(&pool, customer, true, 10, 0)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].link.as_deref(), Some("/tickets/9"));
}

//! HTTP-level tests for support tickets, announcements, notifications, and
//! designer leave.

mod common;

use axum::http::StatusCode;
use chrono::{Days, Utc};
use common::{body_json, get_auth, post_json_auth, seed_and_login};
use serde_json::json;
use sqlx::PgPool;
use studiodesk_db::models::designer::CreateDesigner;
use studiodesk_db::repositories::DesignerRepo;
use studiodesk_events::{event_types, NotificationWriter};

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn ticket_reply_moves_to_in_progress_and_notifies_author(pool: PgPool) {
    let (app, bus) = common::build_test_app_with_bus(pool.clone());
    let (customer, token) = seed_and_login(&app, &pool, "c@example.com", "customer").await;
    let (_, staff) = seed_and_login(&app, &pool, "pm@example.com", "manager").await;

    let created = post_json_auth(
        app.clone(),
        "/api/v1/tickets",
        json!({ "subject": "Invoice question", "body": "Where is it?", "category": "payment" }),
        &token,
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let ticket_id = body_json(created).await["id"].as_i64().unwrap();

    let mut events = bus.subscribe();
    let reply = post_json_auth(
        app.clone(),
        &format!("/api/v1/tickets/{ticket_id}/reply"),
        json!({ "reply": "Sent again just now" }),
        &staff,
    )
    .await;
    assert_eq!(reply.status(), StatusCode::OK);
    let ticket = body_json(reply).await;
    assert_eq!(ticket["status_id"], 2);
    assert_eq!(ticket["admin_reply"], "Sent again just now");

    let event = events.try_recv().unwrap();
    assert_eq!(event.event_type, event_types::TICKET_REPLIED);

    // Delivering the event writes the author's notification.
    let delivered = NotificationWriter::deliver(&pool, &event).await.unwrap();
    assert_eq!(delivered, 1);

    let unread = body_json(get_auth(app.clone(), "/api/v1/notifications/unread-count", &token).await).await;
    assert_eq!(unread["unread_count"], 1);

    let list = body_json(get_auth(app.clone(), "/api/v1/notifications", &token).await).await;
    let notification_id = list["data"][0]["id"].as_i64().unwrap();
    assert_eq!(list["data"][0]["user_id"], customer.id);

    let read = post_json_auth(
        app.clone(),
        &format!("/api/v1/notifications/{notification_id}/read"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(read.status(), StatusCode::NO_CONTENT);

    let unread = body_json(get_auth(app, "/api/v1/notifications/unread-count", &token).await).await;
    assert_eq!(unread["unread_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tickets_are_private_to_their_author(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, author) = seed_and_login(&app, &pool, "a@example.com", "customer").await;
    let (_, other) = seed_and_login(&app, &pool, "b@example.com", "customer").await;

    let created = post_json_auth(
        app.clone(),
        "/api/v1/tickets",
        json!({ "subject": "Login trouble", "body": "Help" }),
        &author,
    )
    .await;
    let ticket = body_json(created).await;
    assert_eq!(ticket["category"], "general");

    let response = get_auth(app.clone(), &format!("/api/v1/tickets/{}", ticket["id"]), &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let list = body_json(get_auth(app, "/api/v1/tickets", &other).await).await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn closed_ticket_is_terminal(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, author) = seed_and_login(&app, &pool, "a@example.com", "customer").await;
    let (_, staff) = seed_and_login(&app, &pool, "pm@example.com", "manager").await;

    let ticket = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/tickets",
            json!({ "subject": "Spam", "body": "Ignore" }),
            &author,
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/tickets/{}/status", ticket["id"]);

    let close = post_json_auth(app.clone(), &uri, json!({ "status_id": 4 }), &staff).await;
    assert_eq!(close.status(), StatusCode::OK);

    let reopen = post_json_auth(app.clone(), &uri, json!({ "status_id": 1 }), &staff).await;
    assert_eq!(reopen.status(), StatusCode::BAD_REQUEST);

    let reply = post_json_auth(
        app,
        &format!("/api/v1/tickets/{}/reply", ticket["id"]),
        json!({ "reply": "Too late" }),
        &staff,
    )
    .await;
    assert_eq!(reply.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn announcements_are_filtered_by_audience(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, staff) = seed_and_login(&app, &pool, "pm@example.com", "manager").await;
    let (_, customer) = seed_and_login(&app, &pool, "c@example.com", "customer").await;
    let (_, designer) = seed_and_login(&app, &pool, "d@example.com", "designer").await;

    for (title, audience) in [("Everyone", "all"), ("Designers only", "designers")] {
        let created = post_json_auth(
            app.clone(),
            "/api/v1/announcements",
            json!({ "title": title, "body": "Details", "audience": audience }),
            &staff,
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let id = body_json(created).await["id"].as_i64().unwrap();
        let published = post_json_auth(
            app.clone(),
            &format!("/api/v1/announcements/{id}/publish"),
            json!({}),
            &staff,
        )
        .await;
        assert_eq!(published.status(), StatusCode::OK);
    }

    // An unpublished draft is hidden from everyone but staff.
    post_json_auth(
        app.clone(),
        "/api/v1/announcements",
        json!({ "title": "Draft", "body": "WIP" }),
        &staff,
    )
    .await;

    let titles = |json: serde_json::Value| -> Vec<String> {
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap().to_string())
            .collect()
    };

    let seen = titles(body_json(get_auth(app.clone(), "/api/v1/announcements", &customer).await).await);
    assert_eq!(seen, vec!["Everyone".to_string()]);

    let seen = titles(body_json(get_auth(app.clone(), "/api/v1/announcements", &designer).await).await);
    assert_eq!(seen.len(), 2);

    let seen = titles(body_json(get_auth(app, "/api/v1/announcements", &staff).await).await);
    assert_eq!(seen.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_audience_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, staff) = seed_and_login(&app, &pool, "pm@example.com", "manager").await;

    let response = post_json_auth(
        app,
        "/api/v1/announcements",
        json!({ "title": "Hi", "body": "There", "audience": "everyone" }),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Vacation requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn designer_leave_is_reviewed_once(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (designer_user, designer) = seed_and_login(&app, &pool, "d@example.com", "designer").await;
    let (_, staff) = seed_and_login(&app, &pool, "pm@example.com", "manager").await;
    DesignerRepo::create(
        &pool,
        &CreateDesigner {
            user_id: designer_user.id,
            display_name: "Dana".to_string(),
            specialty: None,
            bio: None,
            max_active_projects: None,
        },
    )
    .await
    .unwrap();

    let today = Utc::now().date_naive();
    let too_long = post_json_auth(
        app.clone(),
        "/api/v1/vacation-requests",
        json!({
            "start_date": today.checked_add_days(Days::new(1)).unwrap(),
            "end_date": today.checked_add_days(Days::new(31)).unwrap(),
        }),
        &designer,
    )
    .await;
    assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);

    let created = post_json_auth(
        app.clone(),
        "/api/v1/vacation-requests",
        json!({
            "start_date": today.checked_add_days(Days::new(1)).unwrap(),
            "end_date": today.checked_add_days(Days::new(5)).unwrap(),
            "reason": "Family visit",
        }),
        &designer,
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["id"].as_i64().unwrap();

    let mine = body_json(get_auth(app.clone(), "/api/v1/vacation-requests", &designer).await).await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);

    let approve = post_json_auth(
        app.clone(),
        &format!("/api/v1/vacation-requests/{id}/approve"),
        json!({}),
        &staff,
    )
    .await;
    assert_eq!(approve.status(), StatusCode::OK);

    let reject = post_json_auth(
        app,
        &format!("/api/v1/vacation-requests/{id}/reject"),
        json!({}),
        &staff,
    )
    .await;
    assert_eq!(reject.status(), StatusCode::CONFLICT);
}

//! HTTP-level tests for projects, designer assignment, hold requests, and
//! surveys.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Days, NaiveDate, Utc};
use common::{body_json, get_auth, post_json_auth, seed_and_login, seed_user};
use serde_json::json;
use sqlx::PgPool;
use studiodesk_db::models::designer::CreateDesigner;
use studiodesk_db::repositories::{DesignerRepo, ProjectRepo};
use studiodesk_events::{event_types, EventBus};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn days_from_today(days: u64) -> NaiveDate {
    Utc::now().date_naive().checked_add_days(Days::new(days)).unwrap()
}

struct Fixture {
    app: axum::Router,
    bus: Arc<EventBus>,
    staff_token: String,
    customer_id: i64,
    customer_token: String,
    project_id: i64,
}

/// A manager, a customer, and an active project ending 60 days from today.
async fn active_project(pool: &PgPool) -> Fixture {
    let (app, bus) = common::build_test_app_with_bus(pool.clone());
    let (_, staff_token) = seed_and_login(&app, pool, "pm@example.com", "manager").await;
    let (customer, customer_token) =
        seed_and_login(&app, pool, "client@example.com", "customer").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects",
        json!({
            "customer_id": customer.id,
            "title": "Brand refresh",
            "plan_name": "Standard",
            "end_date": days_from_today(60),
        }),
        &staff_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/status"),
        json!({ "status_id": 2 }),
        &staff_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    Fixture {
        app,
        bus,
        staff_token,
        customer_id: customer.id,
        customer_token,
        project_id,
    }
}

async fn request_hold(f: &Fixture, start: u64, end: u64) -> axum::response::Response {
    post_json_auth(
        f.app.clone(),
        &format!("/api/v1/projects/{}/pause-requests", f.project_id),
        json!({
            "start_date": days_from_today(start),
            "end_date": days_from_today(end),
            "reason": "Vacation",
        }),
        &f.customer_token,
    )
    .await
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn activation_stamps_start_date(pool: PgPool) {
    let f = active_project(&pool).await;
    let project = ProjectRepo::find_by_id(&pool, f.project_id).await.unwrap().unwrap();
    assert_eq!(project.status_id, 2);
    assert_eq!(project.start_date, Some(Utc::now().date_naive()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_projects_are_terminal(pool: PgPool) {
    let f = active_project(&pool).await;
    let uri = format!("/api/v1/projects/{}/status", f.project_id);

    let done = post_json_auth(f.app.clone(), &uri, json!({ "status_id": 4 }), &f.staff_token).await;
    assert_eq!(done.status(), StatusCode::OK);

    let reopen = post_json_auth(f.app.clone(), &uri, json!({ "status_id": 2 }), &f.staff_token).await;
    assert_eq!(reopen.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn customers_only_see_their_own_projects(pool: PgPool) {
    let f = active_project(&pool).await;
    let (_, other_token) = seed_and_login(&f.app, &pool, "other@example.com", "customer").await;

    let own = get_auth(
        f.app.clone(),
        &format!("/api/v1/projects/{}", f.project_id),
        &f.customer_token,
    )
    .await;
    assert_eq!(own.status(), StatusCode::OK);

    let foreign = get_auth(
        f.app.clone(),
        &format!("/api/v1/projects/{}", f.project_id),
        &other_token,
    )
    .await;
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);

    let list = body_json(get_auth(f.app, "/api/v1/projects", &other_token).await).await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn designer_capacity_is_enforced(pool: PgPool) {
    let (app, bus) = common::build_test_app_with_bus(pool.clone());
    let (_, staff) = seed_and_login(&app, &pool, "pm@example.com", "manager").await;
    let customer = seed_user(&pool, "client@example.com", "customer").await;
    let designer_user = seed_user(&pool, "artist@example.com", "designer").await;
    let designer = DesignerRepo::create(
        &pool,
        &CreateDesigner {
            user_id: designer_user.id,
            display_name: "Artist".to_string(),
            specialty: None,
            bio: None,
            max_active_projects: Some(1),
        },
    )
    .await
    .unwrap();

    let mut ids = Vec::new();
    for title in ["First", "Second"] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/projects",
            json!({ "customer_id": customer.id, "title": title }),
            &staff,
        )
        .await;
        ids.push(body_json(response).await["id"].as_i64().unwrap());
    }

    let mut events = bus.subscribe();
    let first = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{}/assign-designer", ids[0]),
        json!({ "designer_id": designer.id }),
        &staff,
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let event = events.try_recv().unwrap();
    assert_eq!(event.event_type, event_types::DESIGNER_ASSIGNED);
    assert_eq!(event.payload_id("customer_id"), Some(customer.id));
    assert_eq!(event.payload_id("designer_user_id"), Some(designer_user.id));

    let second = post_json_auth(
        app,
        &format!("/api/v1/projects/{}/assign-designer", ids[1]),
        json!({ "designer_id": designer.id }),
        &staff,
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Hold requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn hold_span_must_be_seven_to_fourteen_days(pool: PgPool) {
    let f = active_project(&pool).await;

    // 6 days inclusive.
    assert_eq!(request_hold(&f, 1, 6).await.status(), StatusCode::BAD_REQUEST);
    // 15 days inclusive.
    assert_eq!(request_hold(&f, 1, 15).await.status(), StatusCode::BAD_REQUEST);
    // 7 days inclusive.
    assert_eq!(request_hold(&f, 1, 7).await.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn third_hold_is_rejected_whatever_its_dates(pool: PgPool) {
    let f = active_project(&pool).await;

    assert_eq!(request_hold(&f, 1, 7).await.status(), StatusCode::CREATED);
    assert_eq!(request_hold(&f, 20, 33).await.status(), StatusCode::CREATED);

    // Valid window, but over the allowance.
    assert_eq!(request_hold(&f, 40, 46).await.status(), StatusCode::CONFLICT);
    // Invalid window is still reported as over the allowance.
    assert_eq!(request_hold(&f, 40, 41).await.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancelling_holds_does_not_restore_the_allowance(pool: PgPool) {
    let f = active_project(&pool).await;

    for (start, end) in [(1, 7), (20, 26)] {
        let hold = body_json(request_hold(&f, start, end).await).await;
        let cancel = post_json_auth(
            f.app.clone(),
            &format!("/api/v1/pause-requests/{}/cancel", hold["id"]),
            json!({}),
            &f.customer_token,
        )
        .await;
        assert_eq!(cancel.status(), StatusCode::OK);
    }

    for (start, end) in [(40, 46), (60, 66)] {
        assert_eq!(request_hold(&f, start, end).await.status(), StatusCode::CONFLICT);
    }

    let list = body_json(
        get_auth(
            f.app.clone(),
            &format!("/api/v1/projects/{}/pause-requests", f.project_id),
            &f.customer_token,
        )
        .await,
    )
    .await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_the_customer_may_request_a_hold(pool: PgPool) {
    let f = active_project(&pool).await;
    let (_, other) = seed_and_login(&f.app, &pool, "other@example.com", "customer").await;

    let response = post_json_auth(
        f.app.clone(),
        &format!("/api/v1/projects/{}/pause-requests", f.project_id),
        json!({ "start_date": days_from_today(1), "end_date": days_from_today(7) }),
        &other,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_extends_end_date_and_notifies_customer(pool: PgPool) {
    let f = active_project(&pool).await;

    let hold = body_json(request_hold(&f, 1, 10).await).await;
    let hold_id = hold["id"].as_i64().unwrap();

    let mut events = f.bus.subscribe();

    let response = post_json_auth(
        f.app.clone(),
        &format!("/api/v1/pause-requests/{hold_id}/approve"),
        json!({ "review_note": "Enjoy the break" }),
        &f.staff_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let reviewed = body_json(response).await;
    assert_eq!(reviewed["status_id"], 2);

    let project = ProjectRepo::find_by_id(&pool, f.project_id).await.unwrap().unwrap();
    assert_eq!(project.end_date, Some(days_from_today(70)));

    let event = events.try_recv().unwrap();
    assert_eq!(event.event_type, event_types::PAUSE_REVIEWED);
    assert_eq!(event.payload_id("customer_id"), Some(f.customer_id));
    assert_eq!(event.payload_str("status"), Some("approved"));

    // A reviewed request cannot be reviewed again.
    let again = post_json_auth(
        f.app.clone(),
        &format!("/api/v1/pause-requests/{hold_id}/reject"),
        json!({}),
        &f.staff_token,
    )
    .await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let list = body_json(
        get_auth(
            f.app,
            &format!("/api/v1/projects/{}/pause-requests", f.project_id),
            &f.customer_token,
        )
        .await,
    )
    .await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
    assert_eq!(list["data"][0]["review_note"], "Enjoy the break");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn customers_cannot_approve_holds(pool: PgPool) {
    let f = active_project(&pool).await;
    let hold = body_json(request_hold(&f, 1, 7).await).await;

    let response = post_json_auth(
        f.app.clone(),
        &format!("/api/v1/pause-requests/{}/approve", hold["id"]),
        json!({}),
        &f.customer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Surveys
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn survey_requires_completed_project_and_is_unique(pool: PgPool) {
    let f = active_project(&pool).await;
    let survey_uri = format!("/api/v1/projects/{}/survey", f.project_id);
    let body = json!({ "rating": 5, "would_recommend": true, "comment": "Lovely" });

    let early = post_json_auth(f.app.clone(), &survey_uri, body.clone(), &f.customer_token).await;
    assert_eq!(early.status(), StatusCode::CONFLICT);

    post_json_auth(
        f.app.clone(),
        &format!("/api/v1/projects/{}/status", f.project_id),
        json!({ "status_id": 4 }),
        &f.staff_token,
    )
    .await;

    let bad = post_json_auth(
        f.app.clone(),
        &survey_uri,
        json!({ "rating": 6 }),
        &f.customer_token,
    )
    .await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let first = post_json_auth(f.app.clone(), &survey_uri, body.clone(), &f.customer_token).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let dup = post_json_auth(f.app.clone(), &survey_uri, body, &f.customer_token).await;
    assert_eq!(dup.status(), StatusCode::CONFLICT);

    let list = body_json(get_auth(f.app, "/api/v1/surveys", &f.staff_token).await).await;
    assert_eq!(list["average_rating"], 5.0);
}

//! HTTP-level tests for sign-up, login, token refresh, logout, and `/me`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, seed_user, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;
use studiodesk_db::repositories::{RoleRepo, UserRepo};

fn registration(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "password": "long-enough-pw",
        "display_name": "Jamie",
        "company_name": "Jamie & Co",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_customer(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, "/api/v1/auth/register", registration("Jamie@Example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["email"], "jamie@example.com");
    assert_eq!(json["user"]["role"], "customer");

    let id = json["user"]["id"].as_i64().unwrap();
    let role = RoleRepo::role_name_for_user(&pool, id).await.unwrap();
    assert_eq!(role.as_deref(), Some("customer"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = post_json(app.clone(), "/api/v1/auth/register", registration("dup@example.com")).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app, "/api/v1/auth/register", registration("DUP@example.com")).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "email": "short@example.com", "password": "short", "display_name": "S" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_tokens_and_role(pool: PgPool) {
    let user = seed_user(&pool, "mgr@example.com", "manager").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "mgr@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "manager");
    assert_eq!(json["expires_in"], 15 * 60);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_is_401(pool: PgPool) {
    seed_user(&pool, "cust@example.com", "customer").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "cust@example.com", "password": "not-the-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn five_failures_lock_the_account(pool: PgPool) {
    let user = seed_user(&pool, "locked@example.com", "customer").await;
    let app = common::build_test_app(pool.clone());

    for _ in 0..5 {
        let response = post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": "locked@example.com", "password": "bad-password-1" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the right password is refused while locked.
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "locked@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(user.locked_until.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_and_rejects_reuse(pool: PgPool) {
    seed_user(&pool, "rot@example.com", "customer").await;
    let app = common::build_test_app(pool);

    let login = body_json(
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": "rot@example.com", "password": TEST_PASSWORD }),
        )
        .await,
    )
    .await;
    let original = login["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": original }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(json["refresh_token"].as_str().unwrap(), original);

    let reuse = post_json(app, "/api/v1/auth/refresh", json!({ "refresh_token": original })).await;
    assert_eq!(reuse.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    seed_user(&pool, "bye@example.com", "customer").await;
    let app = common::build_test_app(pool);

    let login = body_json(
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": "bye@example.com", "password": TEST_PASSWORD }),
        )
        .await,
    )
    .await;
    let access = login["access_token"].as_str().unwrap();
    let refresh = login["refresh_token"].as_str().unwrap();

    let response = post_json_auth(app.clone(), "/api/v1/auth/logout", json!({}), access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(app, "/api/v1/auth/refresh", json!({ "refresh_token": refresh })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_profile_update(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = common::seed_and_login(&app, &pool, "me@example.com", "customer").await;

    let response = common::put_json_auth(
        app.clone(),
        "/api/v1/me",
        json!({ "display_name": "New Name", "phone": "010-0000-0000" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(app, "/api/v1/me", &token).await).await;
    assert_eq!(json["display_name"], "New Name");
    assert_eq!(json["phone"], "010-0000-0000");
    assert_eq!(json["role"], "customer");
}

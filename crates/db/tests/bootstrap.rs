use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify lookup seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    studiodesk_db::health_check(&pool).await.unwrap();

    let tables = [
        ("roles", 4),
        ("lead_statuses", 6),
        ("payment_request_statuses", 3),
        ("project_statuses", 5),
        ("payment_statuses", 4),
        ("request_statuses", 4),
        ("ticket_statuses", 4),
    ];

    for (table, expected) in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, expected, "{table} seed row count");
    }
}

/// Seeded role IDs line up with the constants in the core crate.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_ids_match_core_constants(pool: PgPool) {
    use studiodesk_core::roles::*;
    use studiodesk_db::repositories::RoleRepo;

    for (id, name) in [
        (ROLE_ADMIN_ID, ROLE_ADMIN),
        (ROLE_MANAGER_ID, ROLE_MANAGER),
        (ROLE_DESIGNER_ID, ROLE_DESIGNER),
        (ROLE_CUSTOMER_ID, ROLE_CUSTOMER),
    ] {
        let role = RoleRepo::find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(role.name, name);
    }
}

/// `updated_at` is bumped by the shared trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, created): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO leads (name, email) VALUES ('Trigger', 't@example.com')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let (updated,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE leads SET admin_notes = 'x' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(updated > created);
}

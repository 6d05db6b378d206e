//! Integration tests for project soft-delete and designer load counting.

use sqlx::PgPool;
use studiodesk_core::project_lifecycle::status;
use studiodesk_db::models::designer::CreateDesigner;
use studiodesk_db::models::project::CreateProject;
use studiodesk_db::models::user::CreateUser;
use studiodesk_db::repositories::{DesignerRepo, ProjectRepo, UserRepo};

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: "x".to_string(),
        display_name: email.to_string(),
        phone: None,
        company_name: None,
    }
}

fn new_project(customer_id: i64, title: &str) -> CreateProject {
    CreateProject {
        customer_id,
        lead_id: None,
        title: title.to_string(),
        description: None,
        plan_name: None,
        start_date: None,
        end_date: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_project_is_hidden(pool: PgPool) {
    let customer = UserRepo::create(&pool, &new_user("c@example.com")).await.unwrap();
    let project = ProjectRepo::create(&pool, &new_project(customer.id, "Logo")).await.unwrap();

    assert!(ProjectRepo::soft_delete(&pool, project.id).await.unwrap());
    assert!(ProjectRepo::find_by_id(&pool, project.id).await.unwrap().is_none());
    assert!(ProjectRepo::list_for_customer(&pool, customer.id).await.unwrap().is_empty());

    // Second call is a no-op.
    assert!(!ProjectRepo::soft_delete(&pool, project.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_open_project_count_ignores_closed_and_deleted(pool: PgPool) {
    let customer = UserRepo::create(&pool, &new_user("c@example.com")).await.unwrap();
    let designer_user = UserRepo::create(&pool, &new_user("d@example.com")).await.unwrap();
    let designer = DesignerRepo::create(
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
    assert_eq!(designer.max_active_projects, 3);

    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let p = ProjectRepo::create(&pool, &new_project(customer.id, title)).await.unwrap();
        ProjectRepo::assign_designer(&pool, p.id, designer.id).await.unwrap();
        ids.push(p.id);
    }
    ProjectRepo::set_status(&pool, ids[1], status::PENDING, status::COMPLETED, None)
        .await
        .unwrap();
    ProjectRepo::soft_delete(&pool, ids[2]).await.unwrap();

    assert_eq!(DesignerRepo::count_open_projects(&pool, designer.id).await.unwrap(), 1);

    let listed = DesignerRepo::list_with_load(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].open_projects, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activation_stamps_missing_start_date(pool: PgPool) {
    let customer = UserRepo::create(&pool, &new_user("c@example.com")).await.unwrap();
    let project = ProjectRepo::create(&pool, &new_project(customer.id, "Site")).await.unwrap();
    let today = chrono::Utc::now().date_naive();

    let active =
        ProjectRepo::set_status(&pool, project.id, status::PENDING, status::ACTIVE, Some(today))
            .await
            .unwrap()
            .unwrap();
    assert_eq!(active.start_date, Some(today));
    assert_eq!(active.status_id, status::ACTIVE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_update_requires_expected_current_status(pool: PgPool) {
    let customer = UserRepo::create(&pool, &new_user("c@example.com")).await.unwrap();
    let project = ProjectRepo::create(&pool, &new_project(customer.id, "Site")).await.unwrap();

    ProjectRepo::set_status(&pool, project.id, status::PENDING, status::ACTIVE, None)
        .await
        .unwrap()
        .unwrap();

    // A second writer that read the project while it was still pending loses.
    let stale =
        ProjectRepo::set_status(&pool, project.id, status::PENDING, status::CANCELLED, None)
            .await
            .unwrap();
    assert!(stale.is_none());

    let current = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(current.status_id, status::ACTIVE);
}

//! Read-only aggregate queries for the back-office dashboard.

use sqlx::PgPool;
use studiodesk_core::{leads, payment_link, project_lifecycle, review, tickets};

use crate::models::dashboard::AdminDashboardCounts;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Headline counts in a single round trip.
    pub async fn admin_counts(pool: &PgPool) -> Result<AdminDashboardCounts, sqlx::Error> {
        sqlx::query_as::<_, AdminDashboardCounts>(
            "SELECT
                (SELECT COUNT(*) FROM leads WHERE status_id = $1) AS new_leads,
                (SELECT COUNT(*) FROM projects
                    WHERE status_id = $2 AND deleted_at IS NULL) AS active_projects,
                (SELECT COUNT(*) FROM project_pause_requests
                    WHERE status_id = $3) AS pending_pause_requests,
                (SELECT COUNT(*) FROM vacation_requests
                    WHERE status_id = $3) AS pending_vacation_requests,
                (SELECT COUNT(*) FROM support_tickets
                    WHERE status_id IN ($4, $5)) AS open_tickets,
                (SELECT COUNT(*) FROM payment_requests
                    WHERE status_id = $6 AND expires_at > NOW()) AS pending_payment_requests",
        )
        .bind(leads::status::NEW)
        .bind(project_lifecycle::status::ACTIVE)
        .bind(review::status::PENDING)
        .bind(tickets::status::OPEN)
        .bind(tickets::status::IN_PROGRESS)
        .bind(payment_link::status::PENDING)
        .fetch_one(pool)
        .await
    }
}

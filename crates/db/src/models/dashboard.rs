//! Aggregate counts for the back-office dashboard.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminDashboardCounts {
    pub new_leads: i64,
    pub active_projects: i64,
    pub pending_pause_requests: i64,
    pub pending_vacation_requests: i64,
    pub open_tickets: i64,
    pub pending_payment_requests: i64,
}

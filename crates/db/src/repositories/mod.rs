//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods that take part in a
//! multi-statement transaction accept `&mut PgConnection` or any
//! `PgExecutor` instead.

pub mod announcement_repo;
pub mod dashboard_repo;
pub mod designer_repo;
pub mod lead_repo;
pub mod notification_repo;
pub mod pause_request_repo;
pub mod payment_repo;
pub mod payment_request_repo;
pub mod project_repo;
pub mod quote_repo;
pub mod role_repo;
pub mod session_repo;
pub mod survey_repo;
pub mod ticket_repo;
pub mod user_repo;
pub mod vacation_request_repo;

pub use announcement_repo::AnnouncementRepo;
pub use dashboard_repo::DashboardRepo;
pub use designer_repo::DesignerRepo;
pub use lead_repo::LeadRepo;
pub use notification_repo::NotificationRepo;
pub use pause_request_repo::PauseRequestRepo;
pub use payment_repo::PaymentRepo;
pub use payment_request_repo::PaymentRequestRepo;
pub use project_repo::ProjectRepo;
pub use quote_repo::QuoteRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use survey_repo::SurveyRepo;
pub use ticket_repo::TicketRepo;
pub use user_repo::UserRepo;
pub use vacation_request_repo::VacationRequestRepo;

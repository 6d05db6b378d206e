//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches where the entity is editable

pub mod announcement;
pub mod dashboard;
pub mod designer;
pub mod lead;
pub mod notification;
pub mod pause_request;
pub mod payment;
pub mod payment_request;
pub mod project;
pub mod quote;
pub mod role;
pub mod session;
pub mod status;
pub mod survey;
pub mod ticket;
pub mod user;
pub mod vacation_request;

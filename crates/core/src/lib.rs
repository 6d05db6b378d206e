//! Domain rules for the Studio Desk agency backend.
//!
//! This crate has zero internal deps and performs no IO, so every rule here
//! can be exercised by the API layer, the repositories, and unit tests alike.

pub mod announcements;
pub mod error;
pub mod field_validation;
pub mod holding;
pub mod leads;
pub mod pagination;
pub mod payment_link;
pub mod project_lifecycle;
pub mod quotes;
pub mod review;
pub mod roles;
pub mod survey;
pub mod tickets;
pub mod types;
pub mod vacation;

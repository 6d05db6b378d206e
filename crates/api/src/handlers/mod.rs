//! Request handlers, one submodule per resource.
//!
//! Handlers validate input with `studiodesk_core` rules, delegate persistence
//! to the repositories in `studiodesk_db`, publish platform events for the
//! notification writer, and map errors via [`AppError`](crate::error::AppError).

pub mod admin;
pub mod announcements;
pub mod auth;
pub mod designers;
pub mod leads;
pub mod me;
pub mod notifications;
pub mod pause_requests;
pub mod payment_requests;
pub mod payments;
pub mod projects;
pub mod surveys;
pub mod tickets;
pub mod vacation_requests;

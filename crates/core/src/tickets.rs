//! Support ticket categories and status state machine.

use crate::error::CoreError;
use crate::field_validation::{validate_max_len, validate_required};
use crate::types::StatusId;

pub const MAX_SUBJECT_LEN: usize = 200;
pub const MAX_BODY_LEN: usize = 10_000;

/// Accepted ticket categories.
pub const CATEGORIES: &[&str] = &["general", "project", "payment", "account", "other"];

/// Ticket status IDs matching `ticket_statuses` seed data.
pub mod status {
    use crate::types::StatusId;

    pub const OPEN: StatusId = 1;
    pub const IN_PROGRESS: StatusId = 2;
    pub const RESOLVED: StatusId = 3;
    pub const CLOSED: StatusId = 4;
}

pub fn validate_ticket(subject: &str, body: &str, category: &str) -> Result<(), CoreError> {
    validate_required(subject, "subject")?;
    validate_max_len(subject, MAX_SUBJECT_LEN, "subject")?;
    validate_required(body, "body")?;
    validate_max_len(body, MAX_BODY_LEN, "body")?;
    if !CATEGORIES.contains(&category) {
        return Err(CoreError::Validation(format!(
            "Unknown ticket category '{category}'. Valid: {}",
            CATEGORIES.join(", ")
        )));
    }
    Ok(())
}

pub mod state_machine {
    use super::status::*;
    use crate::types::StatusId;

    pub fn valid_transitions(from_status: StatusId) -> &'static [StatusId] {
        match from_status {
            OPEN => &[IN_PROGRESS, CLOSED],
            IN_PROGRESS => &[RESOLVED, CLOSED],
            // Customers sometimes reply after resolution; staff reopen.
            RESOLVED => &[IN_PROGRESS, CLOSED],
            CLOSED => &[],
            _ => &[],
        }
    }

    pub fn can_transition(from: StatusId, to: StatusId) -> bool {
        valid_transitions(from).contains(&to)
    }
}

pub fn validate_transition(from: StatusId, to: StatusId) -> Result<(), CoreError> {
    if state_machine::can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid ticket transition: {from} -> {to}"
        )))
    }
}

/// Status a ticket moves to when staff post a reply.
///
/// Open tickets move to In Progress; others keep their status.
pub fn status_after_reply(current: StatusId) -> StatusId {
    if current == status::OPEN {
        status::IN_PROGRESS
    } else {
        current
    }
}

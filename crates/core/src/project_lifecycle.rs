//! Project status state machine and designer capacity rule.

use crate::error::CoreError;
use crate::types::StatusId;

/// Project status IDs matching `project_statuses` seed data.
pub mod status {
    use crate::types::StatusId;

    pub const PENDING: StatusId = 1;
    pub const ACTIVE: StatusId = 2;
    pub const ON_HOLD: StatusId = 3;
    pub const COMPLETED: StatusId = 4;
    pub const CANCELLED: StatusId = 5;
}

pub mod state_machine {
    use super::status::*;
    use crate::types::StatusId;

    pub fn valid_transitions(from_status: StatusId) -> &'static [StatusId] {
        match from_status {
            PENDING => &[ACTIVE, CANCELLED],
            ACTIVE => &[ON_HOLD, COMPLETED, CANCELLED],
            ON_HOLD => &[ACTIVE, CANCELLED],
            COMPLETED | CANCELLED => &[],
            _ => &[],
        }
    }

    pub fn can_transition(from: StatusId, to: StatusId) -> bool {
        valid_transitions(from).contains(&to)
    }

    pub fn status_name(id: StatusId) -> &'static str {
        match id {
            PENDING => "Pending",
            ACTIVE => "Active",
            ON_HOLD => "On Hold",
            COMPLETED => "Completed",
            CANCELLED => "Cancelled",
            _ => "Unknown",
        }
    }
}

pub fn validate_transition(from: StatusId, to: StatusId) -> Result<(), CoreError> {
    if state_machine::can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid project transition: {} ({from}) -> {} ({to})",
            state_machine::status_name(from),
            state_machine::status_name(to),
        )))
    }
}

/// Whether a project in this status still counts against designer capacity.
pub fn is_open(status_id: StatusId) -> bool {
    matches!(
        status_id,
        status::PENDING | status::ACTIVE | status::ON_HOLD
    )
}

/// Validate that a designer can take one more project.
pub fn validate_designer_capacity(
    is_available: bool,
    open_projects: i64,
    max_active_projects: i32,
) -> Result<(), CoreError> {
    if !is_available {
        return Err(CoreError::Conflict(
            "Designer is not accepting new projects".into(),
        ));
    }
    if open_projects >= i64::from(max_active_projects) {
        return Err(CoreError::Conflict(format!(
            "Designer already has {open_projects} open projects (max {max_active_projects})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::state_machine::*;
    use super::status::*;
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn pending_to_active() {
        assert!(can_transition(PENDING, ACTIVE));
    }

    #[test]
    fn active_to_on_hold_and_back() {
        assert!(can_transition(ACTIVE, ON_HOLD));
        assert!(can_transition(ON_HOLD, ACTIVE));
    }

    #[test]
    fn on_hold_cannot_complete_directly() {
        assert!(!can_transition(ON_HOLD, COMPLETED));
    }

    #[test]
    fn terminal_states() {
        assert!(valid_transitions(COMPLETED).is_empty());
        assert!(valid_transitions(CANCELLED).is_empty());
    }

    #[test]
    fn invalid_transition_message_names_states() {
        let err = validate_transition(COMPLETED, ACTIVE).unwrap_err();
        assert!(err.to_string().contains("Completed"));
        assert!(err.to_string().contains("Active"));
    }

    #[test]
    fn open_statuses() {
        assert!(is_open(PENDING));
        assert!(is_open(ON_HOLD));
        assert!(!is_open(COMPLETED));
    }

    #[test]
    fn capacity_rules() {
        assert!(validate_designer_capacity(true, 2, 3).is_ok());
        assert_matches!(
            validate_designer_capacity(true, 3, 3),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            validate_designer_capacity(false, 0, 3),
            Err(CoreError::Conflict(_))
        );
    }
}

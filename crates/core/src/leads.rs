//! Lead (consultation request) intake rules and status state machine.

use crate::error::CoreError;
use crate::field_validation::{validate_email, validate_max_len, validate_required};
use crate::types::StatusId;

/// Maximum length of the free-form intake message.
pub const MAX_MESSAGE_LEN: usize = 5000;

/// Lead status IDs matching `lead_statuses` seed data (1-based SMALLSERIAL).
pub mod status {
    use crate::types::StatusId;

    pub const NEW: StatusId = 1;
    pub const CONTACTED: StatusId = 2;
    pub const CONSULTING: StatusId = 3;
    pub const QUOTED: StatusId = 4;
    pub const CONVERTED: StatusId = 5;
    pub const LOST: StatusId = 6;
}

/// Validate the public consultation form.
pub fn validate_intake(name: &str, email: &str, message: Option<&str>) -> Result<(), CoreError> {
    validate_required(name, "name")?;
    validate_max_len(name, 100, "name")?;
    validate_email(email)?;
    if let Some(message) = message {
        validate_max_len(message, MAX_MESSAGE_LEN, "message")?;
    }
    Ok(())
}

pub mod state_machine {
    use super::status::*;
    use crate::types::StatusId;

    /// Returns the set of valid target status IDs reachable from `from_status`.
    ///
    /// Converted and Lost are terminal.
    pub fn valid_transitions(from_status: StatusId) -> &'static [StatusId] {
        match from_status {
            NEW => &[CONTACTED, LOST],
            CONTACTED => &[CONSULTING, LOST],
            CONSULTING => &[QUOTED, LOST],
            // A quote can be reworked after further consultation.
            QUOTED => &[CONVERTED, CONSULTING, LOST],
            CONVERTED | LOST => &[],
            _ => &[],
        }
    }

    pub fn can_transition(from: StatusId, to: StatusId) -> bool {
        valid_transitions(from).contains(&to)
    }

    pub fn status_name(id: StatusId) -> &'static str {
        match id {
            NEW => "New",
            CONTACTED => "Contacted",
            CONSULTING => "Consulting",
            QUOTED => "Quoted",
            CONVERTED => "Converted",
            LOST => "Lost",
            _ => "Unknown",
        }
    }
}

/// Validate a lead status change.
pub fn validate_transition(from: StatusId, to: StatusId) -> Result<(), CoreError> {
    if state_machine::can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid lead transition: {} ({from}) -> {} ({to})",
            state_machine::status_name(from),
            state_machine::status_name(to),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::state_machine::*;
    use super::status::*;
    use super::*;

    #[test]
    fn happy_path_to_converted() {
        assert!(can_transition(NEW, CONTACTED));
        assert!(can_transition(CONTACTED, CONSULTING));
        assert!(can_transition(CONSULTING, QUOTED));
        assert!(can_transition(QUOTED, CONVERTED));
    }

    #[test]
    fn any_open_lead_can_be_lost() {
        for from in [NEW, CONTACTED, CONSULTING, QUOTED] {
            assert!(can_transition(from, LOST), "{} -> Lost", status_name(from));
        }
    }

    #[test]
    fn quoted_can_return_to_consulting() {
        assert!(can_transition(QUOTED, CONSULTING));
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        assert!(valid_transitions(CONVERTED).is_empty());
        assert!(valid_transitions(LOST).is_empty());
    }

    #[test]
    fn cannot_skip_to_converted() {
        assert!(validate_transition(NEW, CONVERTED).is_err());
    }

    #[test]
    fn unknown_status_has_no_transitions() {
        assert!(valid_transitions(42).is_empty());
    }

    #[test]
    fn intake_requires_name_and_valid_email() {
        assert!(validate_intake("Lee", "lee@example.com", Some("Need a logo")).is_ok());
        assert!(validate_intake("", "lee@example.com", None).is_err());
        assert!(validate_intake("Lee", "lee", None).is_err());
    }

    #[test]
    fn intake_message_length_capped() {
        let long = "a".repeat(MAX_MESSAGE_LEN + 1);
        assert!(validate_intake("Lee", "lee@example.com", Some(&long)).is_err());
    }
}

//! Review status shared by hold (pause) requests and vacation requests.

use crate::error::CoreError;
use crate::types::StatusId;

/// Request status IDs matching `request_statuses` seed data.
pub mod status {
    use crate::types::StatusId;

    pub const PENDING: StatusId = 1;
    pub const APPROVED: StatusId = 2;
    pub const REJECTED: StatusId = 3;
    pub const CANCELLED: StatusId = 4;
}

/// Only pending requests can be approved, rejected, or cancelled.
pub fn ensure_pending(status_id: StatusId, entity: &str) -> Result<(), CoreError> {
    if status_id != status::PENDING {
        return Err(CoreError::Conflict(format!(
            "{entity} has already been {}",
            status_name(status_id).to_lowercase()
        )));
    }
    Ok(())
}

pub fn status_name(id: StatusId) -> &'static str {
    match id {
        status::PENDING => "Pending",
        status::APPROVED => "Approved",
        status::REJECTED => "Rejected",
        status::CANCELLED => "Cancelled",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_passes() {
        assert!(ensure_pending(status::PENDING, "Hold request").is_ok());
    }

    #[test]
    fn reviewed_request_is_a_conflict() {
        let err = ensure_pending(status::APPROVED, "Hold request").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Conflict: Hold request has already been approved"
        );
    }
}

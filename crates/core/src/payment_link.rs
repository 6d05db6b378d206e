//! Tokenized, time-limited payment links issued against a quote.
//!
//! A link is usable iff it is still pending and the current time is strictly
//! before its stored expiry.

use rand::Rng;

use crate::error::CoreError;
use crate::types::{StatusId, Timestamp};

/// Length of the generated link token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 32;

/// Default link lifetime.
pub const DEFAULT_LINK_TTL_DAYS: i64 = 7;

/// Payment request status IDs matching `payment_request_statuses` seed data.
pub mod status {
    use crate::types::StatusId;

    pub const PENDING: StatusId = 1;
    pub const PAID: StatusId = 2;
    pub const CANCELLED: StatusId = 3;
}

/// Generate a random opaque link token.
pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Expiry timestamp for a link issued at `issued_at`.
pub fn expiry_from(issued_at: Timestamp, ttl_days: i64) -> Timestamp {
    issued_at + chrono::Duration::days(ttl_days)
}

/// A link is expired once `now` reaches its expiry.
pub fn is_expired(expires_at: Timestamp, now: Timestamp) -> bool {
    now >= expires_at
}

/// Check that a link can still be viewed or completed.
///
/// Expiry is checked first: a stale link is rejected whatever its status.
pub fn ensure_usable(
    status_id: StatusId,
    expires_at: Timestamp,
    now: Timestamp,
) -> Result<(), CoreError> {
    if is_expired(expires_at, now) {
        return Err(CoreError::Gone("Payment link has expired".into()));
    }
    match status_id {
        status::PENDING => Ok(()),
        status::PAID => Err(CoreError::Conflict(
            "Payment link has already been used".into(),
        )),
        status::CANCELLED => Err(CoreError::Gone("Payment link was cancelled".into())),
        other => Err(CoreError::Internal(format!(
            "Unknown payment request status {other}"
        ))),
    }
}

/// Build the customer-facing URL for a link token.
pub fn link_url(public_base_url: &str, token: &str) -> String {
    format!("{}/pay/{token}", public_base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn at(day: u32, hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 4, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn token_has_expected_shape() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn tokens_are_distinct() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn expiry_is_seven_days_out_by_default() {
        let issued = at(1, 9);
        assert_eq!(expiry_from(issued, DEFAULT_LINK_TTL_DAYS), at(8, 9));
    }

    #[test]
    fn usable_before_expiry() {
        assert!(ensure_usable(status::PENDING, at(8, 9), at(8, 8)).is_ok());
    }

    #[test]
    fn rejected_at_expiry_instant() {
        assert_matches!(
            ensure_usable(status::PENDING, at(8, 9), at(8, 9)),
            Err(CoreError::Gone(_))
        );
    }

    #[test]
    fn rejected_after_expiry_even_if_pending() {
        assert_matches!(
            ensure_usable(status::PENDING, at(8, 9), at(20, 0)),
            Err(CoreError::Gone(_))
        );
    }

    #[test]
    fn paid_link_is_a_conflict() {
        assert_matches!(
            ensure_usable(status::PAID, at(8, 9), at(2, 0)),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn cancelled_link_is_gone() {
        assert_matches!(
            ensure_usable(status::CANCELLED, at(8, 9), at(2, 0)),
            Err(CoreError::Gone(_))
        );
    }

    #[test]
    fn link_url_strips_trailing_slash() {
        assert_eq!(
            link_url("https://studio.example/", "abc"),
            "https://studio.example/pay/abc"
        );
    }
}

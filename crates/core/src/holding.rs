//! Project holding (pause) window rules.
//!
//! A customer may suspend a project's timeline for an inclusive span of
//! [`MIN_HOLD_DAYS`]..=[`MAX_HOLD_DAYS`] days, at most
//! [`MAX_HOLDS_PER_PROJECT`] times per project.

use chrono::Days;

use crate::error::CoreError;
use crate::types::Date;

/// Shortest accepted hold, counted inclusively.
pub const MIN_HOLD_DAYS: i64 = 7;

/// Longest accepted hold, counted inclusively.
pub const MAX_HOLD_DAYS: i64 = 14;

/// Number of hold requests a project may accumulate.
pub const MAX_HOLDS_PER_PROJECT: i64 = 2;

/// Number of calendar days covered by `start..=end`.
///
/// Negative or zero when `end` precedes `start`.
pub fn inclusive_span_days(start: Date, end: Date) -> i64 {
    end.signed_duration_since(start).num_days() + 1
}

/// Validate the date window of a hold, returning its inclusive span in days.
pub fn validate_hold_window(start: Date, end: Date) -> Result<i64, CoreError> {
    if end < start {
        return Err(CoreError::Validation(format!(
            "Hold end date {end} is before start date {start}"
        )));
    }

    let span = inclusive_span_days(start, end);
    if !(MIN_HOLD_DAYS..=MAX_HOLD_DAYS).contains(&span) {
        return Err(CoreError::Validation(format!(
            "Hold must span between {MIN_HOLD_DAYS} and {MAX_HOLD_DAYS} days, got {span}"
        )));
    }
    Ok(span)
}

/// Reject a new hold once the project already has the maximum number.
pub fn validate_hold_allowance(existing_requests: i64) -> Result<(), CoreError> {
    if existing_requests >= MAX_HOLDS_PER_PROJECT {
        return Err(CoreError::Conflict(format!(
            "A project may have at most {MAX_HOLDS_PER_PROJECT} hold requests"
        )));
    }
    Ok(())
}

/// Full check for a new hold request.
///
/// The allowance is checked before the dates, so a request over the limit is
/// rejected whatever its window. Holds cannot start in the past.
pub fn validate_hold_request(
    existing_requests: i64,
    start: Date,
    end: Date,
    today: Date,
) -> Result<i64, CoreError> {
    validate_hold_allowance(existing_requests)?;
    if start < today {
        return Err(CoreError::Validation(format!(
            "Hold cannot start in the past ({start} < {today})"
        )));
    }
    validate_hold_window(start, end)
}

/// Push a project end date back by an approved hold's span.
///
/// Projects without an end date are left without one.
pub fn extend_end_date(end_date: Option<Date>, span_days: i64) -> Option<Date> {
    let days = u64::try_from(span_days).ok()?;
    end_date.and_then(|d| d.checked_add_days(Days::new(days)))
}

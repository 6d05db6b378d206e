//! Designer vacation (leave) request rules.

use crate::error::CoreError;
use crate::holding::inclusive_span_days;
use crate::types::Date;

/// Longest single leave request, counted inclusively.
pub const MAX_VACATION_DAYS: i64 = 30;

/// Validate a leave window, returning its inclusive span in days.
pub fn validate_vacation_window(start: Date, end: Date, today: Date) -> Result<i64, CoreError> {
    if start < today {
        return Err(CoreError::Validation(
            "Vacation cannot start in the past".into(),
        ));
    }
    if end < start {
        return Err(CoreError::Validation(format!(
            "Vacation end date {end} is before start date {start}"
        )));
    }
    let span = inclusive_span_days(start, end);
    if span > MAX_VACATION_DAYS {
        return Err(CoreError::Validation(format!(
            "Vacation may span at most {MAX_VACATION_DAYS} days, got {span}"
        )));
    }
    Ok(span)
}

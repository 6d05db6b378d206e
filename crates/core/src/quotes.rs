//! Subscription quote and payment amount rules.

use crate::error::CoreError;
use crate::field_validation::{validate_max_len, validate_required};

pub const MAX_PLAN_NAME_LEN: usize = 100;

/// Amounts are whole units of the quote currency and must be positive.
pub fn validate_amount(amount: i64) -> Result<(), CoreError> {
    if amount <= 0 {
        return Err(CoreError::Validation(format!(
            "amount must be greater than zero, got {amount}"
        )));
    }
    Ok(())
}

pub fn validate_quote(plan_name: &str, amount: i64, months: Option<i32>) -> Result<(), CoreError> {
    validate_required(plan_name, "plan_name")?;
    validate_max_len(plan_name, MAX_PLAN_NAME_LEN, "plan_name")?;
    validate_amount(amount)?;
    if let Some(months) = months {
        if months < 1 {
            return Err(CoreError::Validation(format!(
                "months must be at least 1, got {months}"
            )));
        }
    }
    Ok(())
}

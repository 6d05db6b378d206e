//! Shared field validation helpers used by intake, sign-up, and ticket rules.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Validate that a string field is present after trimming.
pub fn validate_required(value: &str, name: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{name} is required")));
    }
    Ok(())
}

/// Validate that a string field does not exceed `max` characters.
pub fn validate_max_len(value: &str, max: usize, name: &str) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{name} must be at most {max} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate email syntax.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.trim().validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert!(validate_required("   ", "name").is_err());
        assert!(validate_required("Kim", "name").is_ok());
    }

    #[test]
    fn max_len_counts_characters_not_bytes() {
        assert!(validate_max_len("디자인", 3, "title").is_ok());
        assert!(validate_max_len("디자인팀", 3, "title").is_err());
    }

    #[test]
    fn email_syntax() {
        assert!(validate_email("owner@studio.example").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }
}

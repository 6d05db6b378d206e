//! Post-project satisfaction survey rules.

use crate::error::CoreError;
use crate::field_validation::validate_max_len;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;
pub const MAX_COMMENT_LEN: usize = 2000;

pub fn validate_response(rating: i16, comment: Option<&str>) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    if let Some(comment) = comment {
        validate_max_len(comment, MAX_COMMENT_LEN, "comment")?;
    }
    Ok(())
}

/// Mean rating rounded to two decimals, or `None` without responses.
pub fn average_rating(ratings: &[i16]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    let mean = sum as f64 / ratings.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(validate_response(1, None).is_ok());
        assert!(validate_response(5, Some("Great work")).is_ok());
        assert!(validate_response(0, None).is_err());
        assert!(validate_response(6, None).is_err());
    }

    #[test]
    fn average() {
        assert_eq!(average_rating(&[]), None);
        assert_eq!(average_rating(&[5, 4, 4]), Some(4.33));
    }
}

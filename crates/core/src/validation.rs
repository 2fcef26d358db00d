//! Input validation helpers shared by API handlers.

use validator::ValidationError;

/// Minimum allowed rating on a review.
pub const MIN_RATING: i32 = 1;

/// Maximum allowed rating on a review.
pub const MAX_RATING: i32 = 5;

/// Validate that a review rating is within the allowed 1..=5 range.
pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(ValidationError::new("rating_out_of_range"))
    }
}

/// Validate that a reading-progress value is a fraction in 0.0..=1.0.
pub fn validate_progress(progress: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&progress) && progress.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("progress_out_of_range"))
    }
}

/// Validate a username: 3-32 chars, alphanumeric plus `_` and `-`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len_ok = (3..=32).contains(&username.len());
    let chars_ok = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if len_ok && chars_ok {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username"))
    }
}

//! Input validation for catalog entities.
//!
//! Validation happens here, at the domain boundary, so handlers stay thin
//! and the rules are testable without a database.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum movie title length.
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum movie summary length.
pub const MAX_SUMMARY_LEN: usize = 2000;
/// Maximum comment length.
pub const MAX_COMMENT_LEN: usize = 1000;
/// Earliest accepted release year (first motion picture).
pub const MIN_RELEASE_YEAR: i32 = 1888;
/// Inclusive rating bounds.
pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 10;

/// Watchlist priority levels.
pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";

/// All valid watchlist priorities.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

/// Validate a movie title: non-empty after trimming, within length limits.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a movie summary: non-empty after trimming, within length limits.
pub fn validate_summary(summary: &str) -> Result<(), CoreError> {
    let trimmed = summary.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Summary must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_SUMMARY_LEN {
        return Err(CoreError::Validation(format!(
            "Summary must be at most {MAX_SUMMARY_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a release year against `[1888, current_year + 5]`.
///
/// The upper bound allows announced titles; `current_year` is injected so
/// the rule stays clock-independent.
pub fn validate_release_year(year: i32, current_year: i32) -> Result<(), CoreError> {
    if year < MIN_RELEASE_YEAR || year > current_year + 5 {
        return Err(CoreError::Validation(format!(
            "Release year must be between {MIN_RELEASE_YEAR} and {}",
            current_year + 5
        )));
    }
    Ok(())
}

/// Validate a movie duration in minutes (must be positive).
pub fn validate_duration(duration_mins: i32) -> Result<(), CoreError> {
    if duration_mins < 1 {
        return Err(CoreError::Validation(
            "Duration must be at least 1 minute".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

/// Validate a rating value: integer in `[1, 10]`.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating must be an integer between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Validate comment content: non-empty after trimming, within length limits.
pub fn validate_comment_content(content: &str) -> Result<(), CoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Comment content must not be empty".into(),
        ));
    }
    if trimmed.chars().count() > MAX_COMMENT_LEN {
        return Err(CoreError::Validation(format!(
            "Comment must be at most {MAX_COMMENT_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Watchlist
// ---------------------------------------------------------------------------

/// Validate a watchlist priority string.
pub fn validate_priority(priority: &str) -> Result<(), CoreError> {
    if VALID_PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown priority: '{priority}'. Valid priorities: {}",
            VALID_PRIORITIES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_title_rejected() {
        assert_matches!(validate_title("   "), Err(CoreError::Validation(_)));
        assert!(validate_title("The Third Man").is_ok());
    }

    #[test]
    fn overlong_title_rejected() {
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_title(&long).is_err());
    }

    #[test]
    fn release_year_bounds() {
        assert!(validate_release_year(1887, 2025).is_err());
        assert!(validate_release_year(1888, 2025).is_ok());
        assert!(validate_release_year(2030, 2025).is_ok());
        assert!(validate_release_year(2031, 2025).is_err());
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(validate_duration(0).is_err());
        assert!(validate_duration(1).is_ok());
    }

    #[test]
    fn rating_bounds() {
        assert_matches!(validate_rating(0), Err(CoreError::Validation(_)));
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(10).is_ok());
        assert_matches!(validate_rating(11), Err(CoreError::Validation(_)));
    }

    #[test]
    fn comment_content_bounds() {
        assert!(validate_comment_content("").is_err());
        assert!(validate_comment_content("  \t ").is_err());
        assert!(validate_comment_content("Loved it.").is_ok());
        let long = "y".repeat(MAX_COMMENT_LEN + 1);
        assert!(validate_comment_content(&long).is_err());
    }

    #[test]
    fn priority_values() {
        assert!(validate_priority("low").is_ok());
        assert!(validate_priority("medium").is_ok());
        assert!(validate_priority("high").is_ok());
        assert!(validate_priority("urgent").is_err());
    }
}

//! Popularity scoring engine.
//!
//! Computes the derived 0-100 popularity score for a movie from its
//! aggregate stats. The formula is fixed: the same inputs must always
//! produce the same score, so existing stored scores stay comparable
//! across recomputations. Time is injected by the caller, which keeps
//! the function pure and testable with a fixed clock.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Formula constants
// ---------------------------------------------------------------------------

/// Weight of the rating sub-score in the combined score.
pub const WEIGHT_RATING: f64 = 0.4;
/// Weight of the view-volume sub-score.
pub const WEIGHT_VIEWS: f64 = 0.3;
/// Weight of the comment-volume sub-score.
pub const WEIGHT_COMMENTS: f64 = 0.2;
/// Weight of the recency sub-score.
pub const WEIGHT_RECENCY: f64 = 0.1;

/// Rating count at which the rating sub-score saturates.
pub const RATING_COUNT_SATURATION: f64 = 100.0;
/// Comment count at which the comment sub-score saturates.
pub const COMMENT_COUNT_SATURATION: f64 = 50.0;
/// Divisor applied to `log10(view_count + 1)`; 10^6 views yields 1.0.
pub const VIEW_LOG_DIVISOR: f64 = 6.0;
/// Age in months at which the recency sub-score reaches zero.
pub const RECENCY_HORIZON_MONTHS: f64 = 36.0;

/// One scoring "month" in milliseconds (30 days).
const MONTH_MILLIS: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 30.0;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The subset of a movie record consumed by the scoring engine.
///
/// All counts are non-negative and `average_rating` is within `[0, 10]`;
/// both are enforced by the data model, not re-checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieStats {
    pub total_ratings: i64,
    pub average_rating: f64,
    pub total_comments: i64,
    pub view_count: i64,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

/// Rating quality sub-score in `[0, 1]`.
///
/// Scales the normalized average rating by how many ratings back it,
/// saturating at [`RATING_COUNT_SATURATION`] ratings.
pub fn rating_score(total_ratings: i64, average_rating: f64) -> f64 {
    if total_ratings > 0 {
        (average_rating / 10.0) * (total_ratings as f64 / RATING_COUNT_SATURATION).min(1.0)
    } else {
        0.0
    }
}

/// View-volume sub-score, logarithmic in the view count.
///
/// Reaches 1.0 at one million views and is intentionally NOT capped above
/// that, unlike the other sub-scores. Preserved as-is for score
/// compatibility with previously persisted values.
pub fn view_score(view_count: i64) -> f64 {
    if view_count > 0 {
        ((view_count + 1) as f64).log10() / VIEW_LOG_DIVISOR
    } else {
        0.0
    }
}

/// Comment-volume sub-score in `[0, 1]`, saturating at
/// [`COMMENT_COUNT_SATURATION`] comments.
pub fn comment_score(total_comments: i64) -> f64 {
    if total_comments > 0 {
        (total_comments as f64 / COMMENT_COUNT_SATURATION).min(1.0)
    } else {
        0.0
    }
}

/// Recency sub-score: 1.0 at creation, decaying linearly to 0.0 over
/// [`RECENCY_HORIZON_MONTHS`] scoring months (30 days each).
pub fn recency_score(created_at: Timestamp, now: Timestamp) -> f64 {
    let months_old = (now - created_at).num_milliseconds() as f64 / MONTH_MILLIS;
    (1.0 - months_old / RECENCY_HORIZON_MONTHS).max(0.0)
}

// ---------------------------------------------------------------------------
// Combined score
// ---------------------------------------------------------------------------

/// Compute the popularity score for the given stats at time `now`.
///
/// Weighted sum of the four sub-scores, scaled to 0-100 and rounded to
/// two decimal places. Defined for all non-negative inputs; there are no
/// error conditions.
pub fn calculate_popularity_score(stats: &MovieStats, now: Timestamp) -> f64 {
    let raw = rating_score(stats.total_ratings, stats.average_rating) * WEIGHT_RATING
        + view_score(stats.view_count) * WEIGHT_VIEWS
        + comment_score(stats.total_comments) * WEIGHT_COMMENTS
        + recency_score(stats.created_at, now) * WEIGHT_RECENCY;

    round_two_decimals(raw * 100.0)
}

/// Round to two decimal places, half away from zero.
fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

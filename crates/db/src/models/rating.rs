//! Rating model and aggregate projections.

use reelhouse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub rating: i16,
    pub user_country: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One bucket of the per-movie rating distribution (aggregate query result).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingBucket {
    pub rating: i16,
    pub count: i64,
}

/// Aggregate rating stats for one movie.
///
/// `highest_rating`/`lowest_rating` are `None` when the movie has no
/// ratings at all.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieRatingStats {
    pub total_ratings: i64,
    pub average_rating: f64,
    pub highest_rating: Option<i16>,
    pub lowest_rating: Option<i16>,
}

/// A user's rating joined with basic movie info, for the "my ratings" list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRating {
    pub id: DbId,
    pub movie_id: DbId,
    pub movie_title: String,
    pub movie_image_url: Option<String>,
    pub rating: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

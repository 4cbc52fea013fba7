//! Movie entity, DTOs, and scoring/trending projections.

use reelhouse_core::popularity::MovieStats;
use reelhouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub summary: String,
    pub actors: Vec<String>,
    pub director: Option<String>,
    pub genre: Vec<String>,
    pub release_year: Option<i32>,
    pub duration_mins: Option<i32>,
    pub image_url: Option<String>,
    pub trailer_url: Option<String>,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub total_comments: i64,
    pub view_count: i64,
    pub popularity_score: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Movie {
    /// Project the subset of fields the scoring engine consumes.
    pub fn stats(&self) -> MovieStats {
        MovieStats {
            total_ratings: self.total_ratings,
            average_rating: self.average_rating,
            total_comments: self.total_comments,
            view_count: self.view_count,
            created_at: self.created_at,
        }
    }
}

/// DTO for creating a new movie.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub summary: String,
    pub actors: Option<Vec<String>>,
    pub director: Option<String>,
    pub genre: Option<Vec<String>>,
    pub release_year: Option<i32>,
    pub duration_mins: Option<i32>,
    pub image_url: Option<String>,
    pub trailer_url: Option<String>,
}

/// DTO for updating an existing movie. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub actors: Option<Vec<String>>,
    pub director: Option<String>,
    pub genre: Option<Vec<String>>,
    pub release_year: Option<i32>,
    pub duration_mins: Option<i32>,
    pub image_url: Option<String>,
    pub trailer_url: Option<String>,
}

/// Filter and ordering options for the movie list query.
#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    /// Match movies whose genre array contains this value.
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    /// Minimum `average_rating` (inclusive).
    pub min_rating: Option<f64>,
    /// Case-insensitive substring match against title and summary.
    pub search: Option<String>,
    /// Sort column name; validated against a whitelist in the repository.
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    pub sort_order: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// A movie plus its recent-activity count, as returned by the trending
/// query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrendingMovie {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub movie: Movie,
    /// Ratings plus active comments created within the query window.
    pub recent_activity: i64,
}

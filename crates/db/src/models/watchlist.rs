//! Watchlist model and DTOs.

use reelhouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `watchlist_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WatchlistItem {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub priority: String,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a movie to the watchlist.
#[derive(Debug, Clone, Deserialize)]
pub struct AddWatchlistItem {
    pub priority: Option<String>,
    pub notes: Option<String>,
}

/// A watchlist item joined with basic movie info for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WatchlistEntry {
    pub id: DbId,
    pub movie_id: DbId,
    pub movie_title: String,
    pub movie_image_url: Option<String>,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub release_year: Option<i32>,
    pub duration_mins: Option<i32>,
    pub priority: String,
    pub notes: String,
    pub created_at: Timestamp,
}

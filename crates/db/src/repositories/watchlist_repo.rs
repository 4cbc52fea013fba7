//! Repository for the `watchlist_items` table.

use sqlx::PgPool;

use reelhouse_core::types::DbId;

use crate::models::watchlist::{WatchlistEntry, WatchlistItem};

/// Column list for `watchlist_items` queries.
const COLUMNS: &str = "id, user_id, movie_id, priority, notes, created_at, updated_at";

/// Provides per-user watchlist management.
pub struct WatchlistRepo;

impl WatchlistRepo {
    /// Add a movie to a user's watchlist.
    ///
    /// Duplicates violate `uq_watchlist_user_movie`; callers check
    /// [`Self::exists`] first to return a domain-level conflict instead.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
        priority: &str,
        notes: &str,
    ) -> Result<WatchlistItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO watchlist_items (user_id, movie_id, priority, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WatchlistItem>(&query)
            .bind(user_id)
            .bind(movie_id)
            .bind(priority)
            .bind(notes.trim())
            .fetch_one(pool)
            .await
    }

    /// Whether a movie is already on a user's watchlist.
    pub async fn exists(pool: &PgPool, user_id: DbId, movie_id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM watchlist_items WHERE user_id = $1 AND movie_id = $2
             )",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Remove a movie from a user's watchlist. Returns `true` if removed.
    pub async fn remove(pool: &PgPool, user_id: DbId, movie_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM watchlist_items WHERE user_id = $1 AND movie_id = $2")
                .bind(user_id)
                .bind(movie_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A user's watchlist joined with movie info, newest first. Entries
    /// pointing at soft-deleted movies are filtered out.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WatchlistEntry>, sqlx::Error> {
        sqlx::query_as::<_, WatchlistEntry>(
            "SELECT w.id, w.movie_id, m.title AS movie_title,
                    m.image_url AS movie_image_url, m.average_rating,
                    m.total_ratings, m.release_year, m.duration_mins,
                    w.priority, w.notes, w.created_at
             FROM watchlist_items w
             JOIN movies m ON m.id = w.movie_id
             WHERE w.user_id = $1 AND m.is_active = TRUE
             ORDER BY w.created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Count a user's watchlist entries pointing at active movies.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*)
             FROM watchlist_items w
             JOIN movies m ON m.id = w.movie_id
             WHERE w.user_id = $1 AND m.is_active = TRUE",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}

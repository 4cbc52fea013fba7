//! Repository for the `ratings` table.

use sqlx::PgPool;

use reelhouse_core::types::DbId;

use crate::models::rating::{MovieRatingStats, Rating, RatingBucket, UserRating};

/// Column list for `ratings` queries.
const COLUMNS: &str = "id, user_id, movie_id, rating, user_country, created_at, updated_at";

/// Provides rating CRUD and aggregation queries.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert or update a user's rating for a movie.
    ///
    /// One rating per (user, movie): a second submission overwrites the
    /// first via ON CONFLICT.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
        rating: i16,
        user_country: Option<&str>,
    ) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (user_id, movie_id, rating, user_country)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, movie_id) DO UPDATE SET
                 rating = EXCLUDED.rating,
                 user_country = EXCLUDED.user_country,
                 updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(movie_id)
            .bind(rating)
            .bind(user_country)
            .fetch_one(pool)
            .await
    }

    /// Find a user's rating for a specific movie.
    pub async fn find_by_user_and_movie(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM ratings WHERE user_id = $1 AND movie_id = $2");
        sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user's rating. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, movie_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ratings WHERE user_id = $1 AND movie_id = $2")
            .bind(user_id)
            .bind(movie_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A user's ratings joined with movie info, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserRating>, sqlx::Error> {
        sqlx::query_as::<_, UserRating>(
            "SELECT r.id, r.movie_id, m.title AS movie_title,
                    m.image_url AS movie_image_url, r.rating,
                    r.created_at, r.updated_at
             FROM ratings r
             JOIN movies m ON m.id = r.movie_id
             WHERE r.user_id = $1
             ORDER BY r.created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Total number of ratings a user has submitted.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ratings WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Per-value rating distribution for a movie, ordered by rating value.
    pub async fn distribution(
        pool: &PgPool,
        movie_id: DbId,
    ) -> Result<Vec<RatingBucket>, sqlx::Error> {
        sqlx::query_as::<_, RatingBucket>(
            "SELECT rating, COUNT(*) AS count
             FROM ratings
             WHERE movie_id = $1
             GROUP BY rating
             ORDER BY rating",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Aggregate stats (count, average, min, max) for a movie's ratings.
    pub async fn aggregate_stats(
        pool: &PgPool,
        movie_id: DbId,
    ) -> Result<MovieRatingStats, sqlx::Error> {
        sqlx::query_as::<_, MovieRatingStats>(
            "SELECT COUNT(*) AS total_ratings,
                    COALESCE(ROUND(AVG(rating)::numeric, 1)::double precision, 0)
                        AS average_rating,
                    MAX(rating) AS highest_rating,
                    MIN(rating) AS lowest_rating
             FROM ratings
             WHERE movie_id = $1",
        )
        .bind(movie_id)
        .fetch_one(pool)
        .await
    }
}

//! Repository for the `movies` table.
//!
//! Owns all movie reads and writes, including the denormalized stat
//! refreshes, the popularity-score write-back, and the time-windowed
//! trending query.

use sqlx::{PgPool, Postgres, QueryBuilder};

use reelhouse_core::types::DbId;

use crate::models::movie::{CreateMovie, Movie, MovieFilter, TrendingMovie, UpdateMovie};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, title, summary, actors, director, genre, release_year, duration_mins, \
    image_url, trailer_url, average_rating, total_ratings, total_comments, \
    view_count, popularity_score, is_active, created_at, updated_at";

/// Same column list qualified with the `m.` alias, for joined queries.
const M_COLUMNS: &str = "\
    m.id, m.title, m.summary, m.actors, m.director, m.genre, m.release_year, \
    m.duration_mins, m.image_url, m.trailer_url, m.average_rating, \
    m.total_ratings, m.total_comments, m.view_count, m.popularity_score, \
    m.is_active, m.created_at, m.updated_at";

/// Provides CRUD, aggregation, and scoring persistence for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, summary, actors, director, genre, release_year,
                                 duration_mins, image_url, trailer_url)
             VALUES ($1, $2, COALESCE($3, '{{}}'), $4, COALESCE($5, '{{}}'), $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(input.title.trim())
            .bind(input.summary.trim())
            .bind(&input.actors)
            .bind(&input.director)
            .bind(&input.genre)
            .bind(input.release_year)
            .bind(input.duration_mins)
            .bind(&input.image_url)
            .bind(&input.trailer_url)
            .fetch_one(pool)
            .await
    }

    /// Find an active movie by ID. Soft-deleted movies are treated as absent.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1 AND is_active = TRUE");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active movies matching the filter, with ordering and pagination.
    pub async fn list(pool: &PgPool, filter: &MovieFilter) -> Result<Vec<Movie>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLUMNS} FROM movies WHERE is_active = TRUE"
        ));
        push_filters(&mut qb, filter);

        let column = sort_column(filter.sort_by.as_deref());
        let direction = sort_direction(filter.sort_order.as_deref());
        qb.push(format!(" ORDER BY {column} {direction}"));
        qb.push(" LIMIT ");
        qb.push_bind(filter.limit);
        qb.push(" OFFSET ");
        qb.push_bind(filter.offset);

        qb.build_query_as::<Movie>().fetch_all(pool).await
    }

    /// Count active movies matching the filter (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &MovieFilter) -> Result<i64, sqlx::Error> {
        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM movies WHERE is_active = TRUE");
        push_filters(&mut qb, filter);

        let row: (i64,) = qb.build_query_as().fetch_one(pool).await?;
        Ok(row.0)
    }

    /// Full-text-ish search across title, summary, director, and actors,
    /// ordered by popularity score descending.
    pub async fn search(
        pool: &PgPool,
        term: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let pattern = format!("%{}%", term.trim());
        let query = format!(
            "SELECT {COLUMNS} FROM movies
             WHERE is_active = TRUE
               AND (title ILIKE $1
                    OR summary ILIKE $1
                    OR director ILIKE $1
                    OR EXISTS (SELECT 1 FROM unnest(actors) AS actor WHERE actor ILIKE $1))
             ORDER BY popularity_score DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Top-N active movies by stored popularity score.
    pub async fn top_by_popularity(pool: &PgPool, limit: i64) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies WHERE is_active = TRUE
             ORDER BY popularity_score DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Trending query: active movies ranked by recent activity.
    ///
    /// Counts ratings and active comments created within the last
    /// `window_days` days per movie, drops movies with no recent activity,
    /// and orders by activity count descending with the stored popularity
    /// score as the tie-breaker.
    pub async fn trending(
        pool: &PgPool,
        window_days: i32,
        limit: i64,
    ) -> Result<Vec<TrendingMovie>, sqlx::Error> {
        let query = format!(
            "SELECT {M_COLUMNS}, (r.cnt + c.cnt) AS recent_activity
             FROM movies m
             LEFT JOIN LATERAL (
                 SELECT COUNT(*) AS cnt FROM ratings
                 WHERE movie_id = m.id
                   AND created_at >= NOW() - make_interval(days => $1)
             ) r ON TRUE
             LEFT JOIN LATERAL (
                 SELECT COUNT(*) AS cnt FROM comments
                 WHERE movie_id = m.id
                   AND is_active = TRUE
                   AND created_at >= NOW() - make_interval(days => $1)
             ) c ON TRUE
             WHERE m.is_active = TRUE AND (r.cnt + c.cnt) > 0
             ORDER BY recent_activity DESC, m.popularity_score DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, TrendingMovie>(&query)
            .bind(window_days)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a movie. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                actors = COALESCE($4, actors),
                director = COALESCE($5, director),
                genre = COALESCE($6, genre),
                release_year = COALESCE($7, release_year),
                duration_mins = COALESCE($8, duration_mins),
                image_url = COALESCE($9, image_url),
                trailer_url = COALESCE($10, trailer_url),
                updated_at = NOW()
             WHERE id = $1 AND is_active = TRUE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.actors)
            .bind(&input.director)
            .bind(&input.genre)
            .bind(input.release_year)
            .bind(input.duration_mins)
            .bind(&input.image_url)
            .bind(&input.trailer_url)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a movie. Returns `true` if a row was deactivated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE movies SET is_active = FALSE, updated_at = NOW()
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically increment an active movie's view count, returning the
    /// updated row.
    pub async fn increment_view_count(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET view_count = view_count + 1
             WHERE id = $1 AND is_active = TRUE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Persist a freshly computed popularity score.
    ///
    /// Writes the score column and nothing else; every other field is left
    /// untouched. Returns `false` when the movie no longer exists or has
    /// been soft-deleted since its stats were read.
    pub async fn update_popularity_score(
        pool: &PgPool,
        id: DbId,
        score: f64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE movies SET popularity_score = $2 WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .bind(score)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// IDs of all active movies, for the bulk score recomputation.
    pub async fn list_active_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT id FROM movies WHERE is_active = TRUE ORDER BY id")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Recompute the denormalized rating stats from the `ratings` table.
    ///
    /// Average is rounded to one decimal, matching what clients display.
    pub async fn refresh_rating_stats(pool: &PgPool, movie_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE movies SET
                average_rating = COALESCE(
                    (SELECT ROUND(AVG(rating)::numeric, 1)::double precision
                     FROM ratings WHERE movie_id = $1),
                    0
                ),
                total_ratings = (SELECT COUNT(*) FROM ratings WHERE movie_id = $1),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(movie_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Recompute the denormalized comment count from the `comments` table.
    /// Only active (non-deleted) comments are counted.
    pub async fn refresh_comment_count(pool: &PgPool, movie_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE movies SET
                total_comments = (
                    SELECT COUNT(*) FROM comments
                    WHERE movie_id = $1 AND is_active = TRUE
                ),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(movie_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}

/// Append the filter's WHERE clauses to a query that already has a
/// `WHERE is_active = TRUE` prefix.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &MovieFilter) {
    if let Some(genre) = &filter.genre {
        qb.push(" AND ");
        qb.push_bind(genre.clone());
        qb.push(" = ANY(genre)");
    }
    if let Some(year) = filter.release_year {
        qb.push(" AND release_year = ");
        qb.push_bind(year);
    }
    if let Some(min_rating) = filter.min_rating {
        qb.push(" AND average_rating >= ");
        qb.push_bind(min_rating);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search.trim());
        qb.push(" AND (title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR summary ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}

/// Whitelist the sort column; anything unrecognized falls back to
/// `created_at`. Never interpolate client input into ORDER BY directly.
fn sort_column(requested: Option<&str>) -> &'static str {
    match requested {
        Some("title") => "title",
        Some("release_year") => "release_year",
        Some("average_rating") => "average_rating",
        Some("popularity_score") => "popularity_score",
        Some("view_count") => "view_count",
        _ => "created_at",
    }
}

/// Map the requested sort order onto SQL, defaulting to descending.
fn sort_direction(requested: Option<&str>) -> &'static str {
    match requested {
        Some("asc") => "ASC",
        _ => "DESC",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_column_falls_back() {
        assert_eq!(sort_column(Some("password_hash")), "created_at");
        assert_eq!(sort_column(Some("title")), "title");
        assert_eq!(sort_column(None), "created_at");
    }

    #[test]
    fn sort_direction_defaults_to_desc() {
        assert_eq!(sort_direction(Some("asc")), "ASC");
        assert_eq!(sort_direction(Some("desc")), "DESC");
        assert_eq!(sort_direction(Some("sideways")), "DESC");
        assert_eq!(sort_direction(None), "DESC");
    }
}

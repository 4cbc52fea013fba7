//! Repository for the `comments` table.

use sqlx::PgPool;

use reelhouse_core::types::DbId;

use crate::models::comment::{Comment, CommentWithAuthor};

/// Column list for `comments` queries.
const COLUMNS: &str = "\
    id, user_id, movie_id, content, likes, dislikes, is_edited, is_active, \
    created_at, updated_at";

/// Provides comment CRUD with soft deletion.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (user_id, movie_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(user_id)
            .bind(movie_id)
            .bind(content.trim())
            .fetch_one(pool)
            .await
    }

    /// Find an active comment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1 AND is_active = TRUE");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active comments for a movie joined with author info, newest first.
    pub async fn list_for_movie(
        pool: &PgPool,
        movie_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.user_id, c.movie_id, c.content, c.likes, c.dislikes,
                    c.is_edited, c.created_at, c.updated_at,
                    u.username AS author_username,
                    u.first_name AS author_first_name,
                    u.last_name AS author_last_name
             FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.movie_id = $1 AND c.is_active = TRUE
             ORDER BY c.created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(movie_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Count active comments for a movie.
    pub async fn count_for_movie(pool: &PgPool, movie_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM comments WHERE movie_id = $1 AND is_active = TRUE",
        )
        .bind(movie_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Soft-delete a comment. Returns `true` if a row was deactivated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE comments SET is_active = FALSE, updated_at = NOW()
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

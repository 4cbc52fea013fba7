//! Repository for the `sessions` table (refresh tokens).

use sqlx::PgPool;

use reelhouse_core::types::{DbId, Timestamp};

use crate::models::session::Session;

/// Column list for `sessions` queries.
const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, created_at";

/// Stores and validates hashed refresh tokens.
pub struct SessionRepo;

impl SessionRepo {
    /// Record a new refresh-token session.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        refresh_token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .bind(refresh_token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an unexpired session by token hash.
    pub async fn find_valid(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE refresh_token_hash = $1 AND expires_at > NOW()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(refresh_token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a session by token hash. Returns `true` if a row was removed.
    pub async fn delete_by_hash(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE refresh_token_hash = $1")
            .bind(refresh_token_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every session belonging to a user, returning the count.
    pub async fn delete_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

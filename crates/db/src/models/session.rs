//! Refresh-token session model.

use reelhouse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sessions` table. Only the SHA-256 hash of the refresh
/// token is stored, never the plaintext.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

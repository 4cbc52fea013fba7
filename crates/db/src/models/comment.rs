//! Comment model and DTOs.

use reelhouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub content: String,
    pub likes: i32,
    pub dislikes: i32,
    pub is_edited: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for posting a new comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub content: String,
}

/// A comment joined with its author's display info.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub content: String,
    pub likes: i32,
    pub dislikes: i32,
    pub is_edited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author_username: String,
    pub author_first_name: String,
    pub author_last_name: String,
}

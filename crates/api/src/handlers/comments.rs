//! Comment handlers.
//!
//! Comment writes refresh the movie's denormalized comment count and then
//! recompute its popularity score. Deletion is soft: moderated comments stop
//! counting toward engagement but stay in the table.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use reelhouse_core::error::CoreError;
use reelhouse_core::roles::ROLE_ADMIN;
use reelhouse_core::types::DbId;
use reelhouse_core::validation::validate_comment_content;
use reelhouse_db::models::comment::{Comment, CommentWithAuthor, CreateComment};
use reelhouse_db::repositories::{CommentRepo, MovieRepo};
use reelhouse_db::{clamp_limit, clamp_offset};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::scoring;
use crate::state::AppState;

/// GET /movies/{id}/comments -- active comments with author info, newest
/// first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(movie_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<CommentWithAuthor>>> {
    MovieRepo::find_by_id(&state.pool, movie_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        })?;

    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let comments = CommentRepo::list_for_movie(&state.pool, movie_id, limit, offset).await?;
    let total = CommentRepo::count_for_movie(&state.pool, movie_id).await?;
    Ok(Json(Paginated::new(comments, limit, offset, total)))
}

/// POST /movies/{id}/comments -- post a comment on a movie.
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(movie_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    validate_comment_content(&input.content)?;

    MovieRepo::find_by_id(&state.pool, movie_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        })?;

    let comment = CommentRepo::create(&state.pool, auth.user_id, movie_id, &input.content).await?;

    MovieRepo::refresh_comment_count(&state.pool, movie_id).await?;
    scoring::update_movie_score(&state.pool, movie_id).await?;

    tracing::info!(user_id = auth.user_id, movie_id, comment_id = comment.id, "Comment posted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// DELETE /comments/{id} -- soft-delete a comment.
///
/// Allowed for the comment's author or an admin; anyone else gets 403.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        })?;

    if comment.user_id != auth.user_id && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the comment author or an admin may delete a comment".into(),
        )));
    }

    CommentRepo::soft_delete(&state.pool, comment_id).await?;
    MovieRepo::refresh_comment_count(&state.pool, comment.movie_id).await?;
    scoring::update_movie_score(&state.pool, comment.movie_id).await?;

    tracing::info!(user_id = auth.user_id, comment_id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}

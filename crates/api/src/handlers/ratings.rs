//! Rating handlers.
//!
//! Every write refreshes the movie's denormalized rating stats and then
//! recomputes its popularity score, keeping the stored score consistent with
//! what the catalog displays.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use reelhouse_core::error::CoreError;
use reelhouse_core::types::DbId;
use reelhouse_core::validation::validate_rating;
use reelhouse_db::models::rating::{Rating, UserRating};
use reelhouse_db::repositories::{MovieRepo, RatingRepo, UserRepo};
use reelhouse_db::{clamp_limit, clamp_offset};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::scoring;
use crate::state::AppState;

/// Request body for `PUT /movies/{id}/rating`.
#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: i16,
}

/// PUT /movies/{id}/rating -- create or replace the caller's rating.
///
/// Upsert semantics: a second submission for the same movie overwrites the
/// first instead of failing or double-counting.
pub async fn rate_movie(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(movie_id): Path<DbId>,
    Json(req): Json<RateRequest>,
) -> AppResult<Json<DataResponse<Rating>>> {
    validate_rating(req.rating)?;

    MovieRepo::find_by_id(&state.pool, movie_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        })?;

    // Snapshot the rater's country for per-country aggregation later.
    let country = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .map(|u| u.country);

    let rating = RatingRepo::upsert(
        &state.pool,
        auth.user_id,
        movie_id,
        req.rating,
        country.as_deref(),
    )
    .await?;

    MovieRepo::refresh_rating_stats(&state.pool, movie_id).await?;
    scoring::update_movie_score(&state.pool, movie_id).await?;

    tracing::info!(user_id = auth.user_id, movie_id, rating = req.rating, "Movie rated");
    Ok(Json(DataResponse { data: rating }))
}

/// GET /movies/{id}/rating -- the caller's rating for a movie, if any.
pub async fn get_my_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(movie_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Option<Rating>>>> {
    let rating = RatingRepo::find_by_user_and_movie(&state.pool, auth.user_id, movie_id).await?;
    Ok(Json(DataResponse { data: rating }))
}

/// DELETE /movies/{id}/rating -- withdraw the caller's rating.
pub async fn delete_my_rating(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(movie_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = RatingRepo::delete(&state.pool, auth.user_id, movie_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Rating",
            id: movie_id,
        }));
    }

    MovieRepo::refresh_rating_stats(&state.pool, movie_id).await?;
    scoring::update_movie_score(&state.pool, movie_id).await?;

    tracing::info!(user_id = auth.user_id, movie_id, "Rating withdrawn");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/me/ratings -- the caller's rating history, newest first.
pub async fn list_my_ratings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<UserRating>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let ratings = RatingRepo::list_for_user(&state.pool, auth.user_id, limit, offset).await?;
    let total = RatingRepo::count_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(Paginated::new(ratings, limit, offset, total)))
}

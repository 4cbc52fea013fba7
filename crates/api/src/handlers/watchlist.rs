//! Per-user watchlist handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use reelhouse_core::error::CoreError;
use reelhouse_core::types::DbId;
use reelhouse_core::validation::{validate_priority, PRIORITY_MEDIUM};
use reelhouse_db::models::watchlist::{AddWatchlistItem, WatchlistEntry, WatchlistItem};
use reelhouse_db::repositories::{MovieRepo, WatchlistRepo};
use reelhouse_db::{clamp_limit, clamp_offset};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// Request body for `POST /users/me/watchlist`.
#[derive(Debug, Deserialize)]
pub struct AddToWatchlistRequest {
    pub movie_id: DbId,
    #[serde(flatten)]
    pub item: AddWatchlistItem,
}

/// GET /users/me/watchlist -- the caller's watchlist, newest first.
pub async fn list_watchlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<WatchlistEntry>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let entries = WatchlistRepo::list_for_user(&state.pool, auth.user_id, limit, offset).await?;
    let total = WatchlistRepo::count_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(Paginated::new(entries, limit, offset, total)))
}

/// POST /users/me/watchlist -- add a movie to the caller's watchlist.
///
/// Priority defaults to `medium`. Adding a movie twice is a 409.
pub async fn add_to_watchlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddToWatchlistRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<WatchlistItem>>)> {
    let priority = req
        .item
        .priority
        .as_deref()
        .unwrap_or(PRIORITY_MEDIUM)
        .to_string();
    validate_priority(&priority)?;

    MovieRepo::find_by_id(&state.pool, req.movie_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Movie",
            id: req.movie_id,
        })?;

    if WatchlistRepo::exists(&state.pool, auth.user_id, req.movie_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Movie is already on the watchlist".into(),
        )));
    }

    let notes = req.item.notes.unwrap_or_default();
    let item =
        WatchlistRepo::add(&state.pool, auth.user_id, req.movie_id, &priority, &notes).await?;

    tracing::info!(user_id = auth.user_id, movie_id = req.movie_id, "Movie added to watchlist");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// DELETE /users/me/watchlist/{movie_id} -- remove a movie from the caller's
/// watchlist.
pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(movie_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = WatchlistRepo::remove(&state.pool, auth.user_id, movie_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "WatchlistItem",
            id: movie_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

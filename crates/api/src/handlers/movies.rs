//! Movie catalog handlers: browsing, search, trending, admin CRUD, and the
//! bulk popularity recomputation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use reelhouse_core::error::CoreError;
use reelhouse_core::types::DbId;
use reelhouse_core::validation::{
    validate_duration, validate_release_year, validate_summary, validate_title,
};
use reelhouse_db::models::movie::{CreateMovie, Movie, MovieFilter, TrendingMovie, UpdateMovie};
use reelhouse_db::models::rating::{MovieRatingStats, RatingBucket};
use reelhouse_db::repositories::{MovieRepo, RatingRepo};
use reelhouse_db::{clamp_limit, clamp_offset, MAX_LIMIT};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, Paginated};
use crate::scoring::{self, RecomputeReport};
use crate::state::AppState;

/// Default trending window in days.
const DEFAULT_TRENDING_WINDOW_DAYS: i32 = 7;
/// Widest accepted trending window in days.
const MAX_TRENDING_WINDOW_DAYS: i32 = 365;
/// Default number of trending results.
const DEFAULT_TRENDING_LIMIT: i64 = 10;

/// Query parameters for `GET /movies`.
#[derive(Debug, Deserialize)]
pub struct MovieListParams {
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub min_rating: Option<f64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /movies/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /movies/top`.
#[derive(Debug, Deserialize)]
pub struct TopParams {
    pub limit: Option<i64>,
}

/// Query parameters for `GET /movies/trending`.
#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    pub days: Option<i32>,
    pub limit: Option<i64>,
}

/// Per-movie rating statistics for `GET /movies/{id}/stats`.
#[derive(Debug, Serialize)]
pub struct MovieStatsResponse {
    pub movie_id: DbId,
    pub stats: MovieRatingStats,
    pub distribution: Vec<RatingBucket>,
}

/// GET /movies -- filtered, sorted, paginated catalog listing.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
) -> AppResult<Json<Paginated<Movie>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let filter = MovieFilter {
        genre: params.genre,
        release_year: params.release_year,
        min_rating: params.min_rating,
        search: params.search,
        sort_by: params.sort_by,
        sort_order: params.sort_order,
        limit,
        offset,
    };

    let movies = MovieRepo::list(&state.pool, &filter).await?;
    let total = MovieRepo::count(&state.pool, &filter).await?;
    Ok(Json(Paginated::new(movies, limit, offset, total)))
}

/// GET /movies/search -- substring search across title, summary, director,
/// and actors.
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<Movie>>>> {
    let term = params.q.trim();
    if term.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Search query must not be empty".into(),
        )));
    }

    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);
    let movies = MovieRepo::search(&state.pool, term, limit, offset).await?;
    Ok(Json(DataResponse { data: movies }))
}

/// GET /movies/top -- highest stored popularity scores.
pub async fn top_movies(
    State(state): State<AppState>,
    Query(params): Query<TopParams>,
) -> AppResult<Json<DataResponse<Vec<Movie>>>> {
    let limit = clamp_limit(params.limit);
    let movies = MovieRepo::top_by_popularity(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: movies }))
}

/// GET /movies/trending -- movies ranked by activity within a recent window.
///
/// `days` defaults to 7 and is clamped to `[1, 365]`; `limit` defaults to 10.
/// Movies with zero in-window activity never appear, regardless of their
/// stored popularity score.
pub async fn trending_movies(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> AppResult<Json<DataResponse<Vec<TrendingMovie>>>> {
    let days = params
        .days
        .unwrap_or(DEFAULT_TRENDING_WINDOW_DAYS)
        .clamp(1, MAX_TRENDING_WINDOW_DAYS);
    let limit = params
        .limit
        .unwrap_or(DEFAULT_TRENDING_LIMIT)
        .clamp(1, MAX_LIMIT);

    let movies = MovieRepo::trending(&state.pool, days, limit).await?;
    Ok(Json(DataResponse { data: movies }))
}

/// GET /movies/{id} -- fetch one movie, counting the request as a view.
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Movie>>> {
    let movie = MovieRepo::increment_view_count(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Movie",
            id,
        })?;
    Ok(Json(DataResponse { data: movie }))
}

/// GET /movies/{id}/stats -- aggregate rating stats and distribution.
pub async fn movie_stats(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MovieStatsResponse>>> {
    // 404 for unknown or soft-deleted movies before running aggregates.
    MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Movie",
            id,
        })?;

    let stats = RatingRepo::aggregate_stats(&state.pool, id).await?;
    let distribution = RatingRepo::distribution(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: MovieStatsResponse {
            movie_id: id,
            stats,
            distribution,
        },
    }))
}

/// POST /movies -- create a movie (admin only).
///
/// The initial popularity score is computed immediately, so a brand-new
/// movie starts with its recency credit instead of a stale zero.
pub async fn create_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<DataResponse<Movie>>)> {
    validate_title(&input.title)?;
    validate_summary(&input.summary)?;
    if let Some(year) = input.release_year {
        validate_release_year(year, Utc::now().year())?;
    }
    if let Some(duration) = input.duration_mins {
        validate_duration(duration)?;
    }

    let mut movie = MovieRepo::create(&state.pool, &input).await?;
    movie.popularity_score = scoring::update_movie_score(&state.pool, movie.id).await?;

    tracing::info!(movie_id = movie.id, admin_id = admin.user_id, "Movie created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: movie })))
}

/// PUT /movies/{id} -- partial update (admin only). Only provided fields
/// change; the score is recomputed afterwards since `created_at`-based
/// recency is unaffected but callers expect a fresh value.
pub async fn update_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMovie>,
) -> AppResult<Json<DataResponse<Movie>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(summary) = &input.summary {
        validate_summary(summary)?;
    }
    if let Some(year) = input.release_year {
        validate_release_year(year, Utc::now().year())?;
    }
    if let Some(duration) = input.duration_mins {
        validate_duration(duration)?;
    }

    let mut movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Movie",
            id,
        })?;
    movie.popularity_score = scoring::update_movie_score(&state.pool, id).await?;

    tracing::info!(movie_id = id, admin_id = admin.user_id, "Movie updated");
    Ok(Json(DataResponse { data: movie }))
}

/// DELETE /movies/{id} -- soft delete (admin only).
pub async fn delete_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = MovieRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id,
        }));
    }

    tracing::info!(movie_id = id, admin_id = admin.user_id, "Movie soft-deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /movies/update-popularity -- recompute every active movie's score
/// (admin only). Per-movie failures are reported, not fatal.
pub async fn update_popularity(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<RecomputeReport>>> {
    tracing::info!(admin_id = admin.user_id, "Bulk popularity recomputation requested");
    let report = scoring::recompute_all_scores(&state.pool).await?;
    Ok(Json(DataResponse { data: report }))
}

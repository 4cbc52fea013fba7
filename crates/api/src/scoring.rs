//! Popularity score persistence service.
//!
//! Glue between the pure scoring formula in `reelhouse_core::popularity` and
//! the `movies` table: reads a movie's denormalized stats, computes the score
//! with the current wall-clock time, and writes it back. Called after every
//! rating or comment change and from the admin bulk-recompute endpoint.

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;

use reelhouse_core::error::CoreError;
use reelhouse_core::popularity::calculate_popularity_score;
use reelhouse_core::types::DbId;
use reelhouse_db::repositories::MovieRepo;

use crate::error::{AppError, AppResult};

/// One failed movie in a bulk recomputation.
#[derive(Debug, Serialize)]
pub struct RecomputeFailure {
    pub movie_id: DbId,
    pub error: String,
}

/// Outcome of a bulk score recomputation.
///
/// Per-movie failures are collected here instead of aborting the batch, so
/// one bad row never blocks the rest of the catalog.
#[derive(Debug, Serialize)]
pub struct RecomputeReport {
    pub updated_count: u64,
    pub failed: Vec<RecomputeFailure>,
}

/// Recompute and persist one movie's popularity score.
///
/// Returns the freshly computed score. Only the `popularity_score` column is
/// written; concurrent writes to other fields are never clobbered. Errors
/// with `NotFound` if the movie is absent or soft-deleted, including when it
/// vanishes between the stats read and the score write.
pub async fn update_movie_score(pool: &PgPool, movie_id: DbId) -> AppResult<f64> {
    let movie = MovieRepo::find_by_id(pool, movie_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        })?;

    let score = calculate_popularity_score(&movie.stats(), Utc::now());

    let written = MovieRepo::update_popularity_score(pool, movie_id, score).await?;
    if !written {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        }));
    }

    tracing::debug!(movie_id, score, "Updated popularity score");
    Ok(score)
}

/// Recompute popularity scores for every active movie.
///
/// Iterates the catalog sequentially; a movie that fails (or disappears
/// mid-batch) is recorded in the report and the batch continues.
pub async fn recompute_all_scores(pool: &PgPool) -> AppResult<RecomputeReport> {
    let ids = MovieRepo::list_active_ids(pool).await?;
    let total = ids.len();

    let mut updated_count: u64 = 0;
    let mut failed = Vec::new();

    for movie_id in ids {
        match update_movie_score(pool, movie_id).await {
            Ok(_) => updated_count += 1,
            Err(err) => {
                tracing::warn!(movie_id, error = %err, "Score recomputation failed for movie");
                failed.push(RecomputeFailure {
                    movie_id,
                    error: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        total,
        updated_count,
        failed_count = failed.len(),
        "Bulk popularity recomputation finished"
    );

    Ok(RecomputeReport {
        updated_count,
        failed,
    })
}

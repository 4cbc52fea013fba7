use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{comments, movies, ratings};
use crate::state::AppState;

/// Mount `/movies` routes, including per-movie rating and comment
/// sub-resources.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list_movies).post(movies::create_movie))
        .route("/search", get(movies::search_movies))
        .route("/top", get(movies::top_movies))
        .route("/trending", get(movies::trending_movies))
        .route("/update-popularity", post(movies::update_popularity))
        .route(
            "/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/{id}/stats", get(movies::movie_stats))
        .route(
            "/{id}/rating",
            put(ratings::rate_movie)
                .get(ratings::get_my_rating)
                .delete(ratings::delete_my_rating),
        )
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
}

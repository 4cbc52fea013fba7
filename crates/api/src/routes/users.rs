use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{ratings, watchlist};
use crate::state::AppState;

/// Mount `/users` routes (all scoped to the authenticated caller via `/me`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me/ratings", get(ratings::list_my_ratings))
        .route(
            "/me/watchlist",
            get(watchlist::list_watchlist).post(watchlist::add_to_watchlist),
        )
        .route(
            "/me/watchlist/{movie_id}",
            delete(watchlist::remove_from_watchlist),
        )
}

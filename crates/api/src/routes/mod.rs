pub mod auth;
pub mod comments;
pub mod health;
pub mod movies;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                      register (public)
/// /auth/login                         login (public)
/// /auth/refresh                       refresh (public)
/// /auth/logout                        logout (public, idempotent)
/// /auth/me                            current user (requires auth)
///
/// /movies                             list (GET), create (POST, admin)
/// /movies/search                      substring search (GET)
/// /movies/top                         top by popularity score (GET)
/// /movies/trending                    trending by recent activity (GET)
/// /movies/update-popularity           bulk score recompute (POST, admin)
/// /movies/{id}                        get (counts a view), update, delete
/// /movies/{id}/stats                  rating stats + distribution (GET)
/// /movies/{id}/rating                 my rating: put, get, delete (auth)
/// /movies/{id}/comments               list (GET), post (POST, auth)
///
/// /comments/{id}                      delete (author or admin)
///
/// /users/me/ratings                   my rating history (GET, auth)
/// /users/me/watchlist                 list (GET), add (POST) (auth)
/// /users/me/watchlist/{movie_id}      remove (DELETE, auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and account routes.
        .nest("/auth", auth::router())
        // Catalog, scoring, and per-movie sub-resources.
        .nest("/movies", movies::router())
        // Comment moderation (author or admin).
        .nest("/comments", comments::router())
        // Per-user resources (ratings history, watchlist).
        .nest("/users", users::router())
}

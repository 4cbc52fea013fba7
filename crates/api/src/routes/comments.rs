use axum::routing::delete;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Mount `/comments` routes (deletion only; creation and listing live under
/// `/movies/{id}/comments`).
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(comments::delete_comment))
}

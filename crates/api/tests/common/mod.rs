//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! against a per-test database and provides small request helpers around
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use reelhouse_api::auth::jwt::{generate_access_token, JwtConfig};
use reelhouse_api::config::ServerConfig;
use reelhouse_api::router::build_app_router;
use reelhouse_api::state::AppState;
use reelhouse_core::types::DbId;
use reelhouse_db::models::user::{CreateUser, User};
use reelhouse_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Create a user directly in the database. The stored password hash is a
/// placeholder; use [`auth_token`] instead of the login endpoint.
pub async fn create_user(pool: &PgPool, email: &str, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            username: username.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            country: "US".to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Promote a user to the admin role directly in the database.
pub async fn make_admin(pool: &PgPool, user_id: DbId) {
    sqlx::query("UPDATE users SET role = 'admin' WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("role update should succeed");
}

/// Generate a valid access token for a user with the test JWT secret.
pub fn auth_token(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Create a regular user and return `(user, bearer_token)`.
pub async fn authed_user(pool: &PgPool, email: &str, username: &str) -> (User, String) {
    let user = create_user(pool, email, username).await;
    let token = auth_token(user.id, "user");
    (user, token)
}

/// Create an admin user and return `(user, bearer_token)`.
pub async fn authed_admin(pool: &PgPool, email: &str, username: &str) -> (User, String) {
    let user = create_user(pool, email, username).await;
    make_admin(pool, user.id).await;
    let token = auth_token(user.id, "admin");
    (user, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn with_bearer(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(t) => builder.header(header::AUTHORIZATION, format!("Bearer {t}")),
        None => builder,
    }
}

/// GET a path without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

/// GET a path with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = with_bearer(Request::builder().uri(uri), Some(token))
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

/// POST a JSON body, optionally authenticated.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let request = with_bearer(Request::builder().method("POST").uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    send(app, request).await
}

/// POST with an empty body, optionally authenticated.
pub async fn post_empty(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let request = with_bearer(Request::builder().method("POST").uri(uri), token)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

/// PUT a JSON body, optionally authenticated.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let request = with_bearer(Request::builder().method("PUT").uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    send(app, request).await
}

/// DELETE a path, optionally authenticated.
pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let request = with_bearer(Request::builder().method("DELETE").uri(uri), token)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

//! Authentication handlers: register, login, refresh, logout, current user.
//!
//! Login failures deliberately return the same "Invalid credentials" message
//! whether the account is missing or the password is wrong, so the endpoint
//! cannot be used to probe which emails are registered.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use reelhouse_core::error::CoreError;
use reelhouse_db::models::user::{CreateUser, User};
use reelhouse_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair plus user info returned by register, login, and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

/// POST /auth/register -- create an account and log it in.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_register_request(&req)?;

    if UserRepo::find_by_email(&state.pool, req.email.trim())
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }
    if UserRepo::find_by_username(&state.pool, req.username.trim())
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: req.email,
            username: req.username,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            country: req.country,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    let response = issue_tokens(&state, user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/login -- exchange email + password for a token pair.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, req.email.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    let verified = verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");
    let response = issue_tokens(&state, user).await?;
    Ok(Json(response))
}

/// POST /auth/refresh -- rotate a refresh token into a fresh token pair.
///
/// The presented token is revoked and replaced, so each refresh token is
/// single-use.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&req.refresh_token);
    let session = SessionRepo::find_valid(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::delete_by_hash(&state.pool, &token_hash).await?;

    let response = issue_tokens(&state, user).await?;
    Ok(Json(response))
}

/// POST /auth/logout -- revoke a refresh token.
///
/// Idempotent: revoking an unknown token still returns 204.
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> AppResult<StatusCode> {
    let token_hash = hash_refresh_token(&req.refresh_token);
    SessionRepo::delete_by_hash(&state.pool, &token_hash).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me -- the authenticated user's profile.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;
    Ok(Json(DataResponse { data: user }))
}

/// Generate an access/refresh token pair and persist the refresh session.
async fn issue_tokens(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;

    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    let (refresh_token, refresh_hash) = generate_refresh_token();
    let expires_at = Utc::now() + Duration::days(jwt.refresh_token_expiry_days);
    SessionRepo::create(&state.pool, user.id, &refresh_hash, expires_at).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        token_type: "Bearer",
        expires_in: jwt.access_token_expiry_mins * 60,
        user,
    })
}

/// Field-level validation for registration input.
fn validate_register_request(req: &RegisterRequest) -> AppResult<()> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') || email.len() > 254 {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        )));
    }

    let username = req.username.trim();
    if username.len() < 3 || username.len() > 50 {
        return Err(AppError::Core(CoreError::Validation(
            "Username must be between 3 and 50 characters".into(),
        )));
    }

    validate_password_strength(&req.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "First and last name are required".into(),
        )));
    }
    if req.country.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Country is required".into(),
        )));
    }

    Ok(())
}

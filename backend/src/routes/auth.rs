//! Authentication and user routes
//!
//! register, login, refresh, and logout, plus user lookup/delete.
//! Every protected handler sits behind the revocation-checking
//! extractors in `crate::auth`.

use crate::auth::{AuthUser, RefreshUser};
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use catalog_shared::types::{
    AccessTokenResponse, AuthTokens, LoginRequest, MessageResponse, RegisterRequest, UserResponse,
};

/// Create auth and user routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/users/:user_id", get(get_user).delete(delete_user))
}

/// Register a new user
///
/// POST /register
///
/// Duplicate username or email responds 400; success enqueues a welcome
/// email and responds 201.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let message = UserService::register(
        state.db(),
        state.email_queue(),
        &req.username,
        &req.email,
        &req.password,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Login with username and password
///
/// POST /login
///
/// Responds with one fresh access token and one refresh token.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = UserService::login(state.db(), state.jwt(), &req.username, &req.password).await?;
    Ok(Json(tokens))
}

/// Mint a new access token from a bearer refresh token
///
/// POST /refresh
///
/// The returned access token is never fresh.
async fn refresh(
    State(state): State<AppState>,
    refresh_user: RefreshUser,
) -> ApiResult<Json<AccessTokenResponse>> {
    let token = UserService::refresh(state.db(), state.jwt(), &refresh_user).await?;
    Ok(Json(token))
}

/// Revoke the presented access token
///
/// POST /logout
async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    let message = UserService::logout(state.db(), &auth).await?;
    Ok(Json(message))
}

/// Fetch a user by id (requires authentication)
///
/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::get_user(state.db(), user_id).await?;
    Ok(Json(user))
}

/// Delete a user (self or admin only)
///
/// DELETE /users/{id}
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = UserService::delete_user(state.db(), &auth, user_id).await?;
    Ok(Json(message))
}

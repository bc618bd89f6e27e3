//! User service for registration, authentication, and revocation
//!
//! Password hashing and verification run on the blocking thread pool;
//! the JWT service is passed by reference (pre-computed keys); the
//! welcome email is enqueued fire-and-forget.

use crate::auth::{AuthUser, JwtService, PasswordService, RefreshUser, Role};
use crate::email::EmailQueue;
use crate::error::ApiError;
use crate::repositories::{BlocklistRepository, UserRecord, UserRepository};
use catalog_shared::types::{AccessTokenResponse, AuthTokens, MessageResponse, UserResponse};
use catalog_shared::validation;
use sqlx::PgPool;
use tracing::info;

/// User service for authentication operations
pub struct UserService;

/// Role granted to a user at token-issue time
///
/// The first registered account administers the catalog; everyone else
/// is a plain user.
fn role_for(user: &UserRecord) -> Role {
    if user.id == 1 {
        Role::Admin
    } else {
        Role::User
    }
}

impl UserService {
    /// Register a new user
    ///
    /// Duplicate username or email is a conflict. The uniqueness
    /// pre-check races with concurrent registrations, so the unique
    /// constraints catch the loser and surface the same conflict.
    pub async fn register(
        pool: &PgPool,
        email_queue: &EmailQueue,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<MessageResponse, ApiError> {
        validation::validate_username(username).map_err(ApiError::Validation)?;
        validation::validate_email(email).map_err(ApiError::Validation)?;
        validation::validate_password(password).map_err(ApiError::Validation)?;

        if UserRepository::username_or_email_exists(pool, username, email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("User already exists".to_string()));
        }

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, username, email, &password_hash)
            .await
            .map_err(|e| super::map_insert_error(e, "User already exists"))?;

        info!(user_id = user.id, "User registered");

        // Fire-and-forget: delivery is the worker's problem, and a failed
        // enqueue never fails the registration.
        email_queue.enqueue_welcome(&user.email, &user.username).await;

        Ok(MessageResponse::new("User created"))
    }

    /// Login with username and password
    ///
    /// Issues one fresh access token and one refresh token. A missing
    /// user and a wrong password are indistinguishable to the caller.
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        username: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let user = UserRepository::find_by_username(pool, username)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(ApiError::BadCredentials)?;

        // Verify password on blocking thread pool (CPU-intensive)
        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone())
                .await
                .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::BadCredentials);
        }

        let role = role_for(&user);
        let access_token = jwt_service
            .generate_access_token(user.id, true, role)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt_service
            .generate_refresh_token(user.id, role)
            .map_err(ApiError::Internal)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
        })
    }

    /// Mint a new access token from a validated, unrevoked refresh token
    ///
    /// The new token is never fresh, and the refresh token itself is
    /// neither rotated nor revoked.
    pub async fn refresh(
        pool: &PgPool,
        jwt_service: &JwtService,
        refresh_user: &RefreshUser,
    ) -> Result<AccessTokenResponse, ApiError> {
        // The subject must still exist; a deleted account cannot mint tokens
        UserRepository::find_by_id(pool, refresh_user.user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        let access_token = jwt_service
            .generate_access_token(refresh_user.user_id, false, refresh_user.role)
            .map_err(ApiError::Internal)?;

        Ok(AccessTokenResponse { access_token })
    }

    /// Revoke the presented access token by blocklisting its jti
    ///
    /// The revocation gate has already rejected revoked tokens before
    /// this runs, so a repeated logout with the same token never reaches
    /// here.
    pub async fn logout(pool: &PgPool, auth: &AuthUser) -> Result<MessageResponse, ApiError> {
        BlocklistRepository::insert(pool, auth.jti)
            .await
            .map_err(ApiError::Internal)?;

        info!(user_id = auth.user_id, jti = %auth.jti, "Token revoked");

        Ok(MessageResponse::new("Successfully logged out"))
    }

    /// Fetch a user by id
    pub async fn get_user(pool: &PgPool, user_id: i64) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        })
    }

    /// Delete a user
    ///
    /// Only the user themself or an admin may delete an account.
    pub async fn delete_user(
        pool: &PgPool,
        auth: &AuthUser,
        user_id: i64,
    ) -> Result<MessageResponse, ApiError> {
        if auth.user_id != user_id {
            auth.require_admin()?;
        }

        let deleted = UserRepository::delete(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        info!(user_id, "User deleted");

        Ok(MessageResponse::new("User deleted"))
    }
}

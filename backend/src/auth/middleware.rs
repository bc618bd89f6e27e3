//! Authentication extractors and policy checks
//!
//! Every authenticated request goes through the same gate, in order:
//! bearer header parse, signature/expiry validation, then a blocklist
//! lookup on the token's `jti`. A revoked token is rejected with 401
//! even when its signature and expiry are still valid. The gate runs
//! before any handler logic.

use crate::error::ApiError;
use crate::repositories::BlocklistRepository;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use super::jwt::{Claims, Role};

/// Authenticated user extracted from a bearer access token
///
/// Exposes the claims the handlers act on: subject, token id,
/// freshness, and role.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub jti: Uuid,
    pub fresh: bool,
    pub role: Role,
}

impl AuthUser {
    /// Require a fresh token (issued directly from a password login)
    ///
    /// Sensitive operations reject tokens minted by the refresh flow.
    pub fn require_fresh(&self) -> Result<(), ApiError> {
        if self.fresh {
            Ok(())
        } else {
            Err(ApiError::Unauthorized("Fresh token required".to_string()))
        }
    }

    /// Require the admin role
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Unauthorized(
                "Admin privilege required".to_string(),
            ))
        }
    }
}

/// Bearer refresh token holder, validated and checked against the blocklist
#[derive(Debug, Clone)]
pub struct RefreshUser {
    pub user_id: i64,
    pub jti: Uuid,
    pub role: Role,
}

/// Pull the bearer token out of the Authorization header
fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))
}

/// Shared tail of both extractors: parse the subject and reject revoked jtis
async fn check_revocation(state: &AppState, claims: &Claims) -> Result<i64, ApiError> {
    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

    if BlocklistRepository::is_revoked(state.db(), claims.jti)
        .await
        .map_err(ApiError::Internal)?
    {
        return Err(ApiError::Unauthorized("Token revoked".to_string()));
    }

    Ok(user_id)
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(parts)?;

        // Signature/expiry/type check with pre-computed keys
        let claims = app_state
            .jwt()
            .validate_access_token(token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

        let user_id = check_revocation(&app_state, &claims).await?;

        Ok(AuthUser {
            user_id,
            jti: claims.jti,
            fresh: claims.fresh,
            role: claims.role,
        })
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for RefreshUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(parts)?;

        let claims = app_state
            .jwt()
            .validate_refresh_token(token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = check_revocation(&app_state, &claims).await?;

        Ok(RefreshUser {
            user_id,
            jti: claims.jti,
            role: claims.role,
        })
    }
}

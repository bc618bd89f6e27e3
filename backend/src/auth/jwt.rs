//! JWT token generation and validation
//!
//! Provides access and refresh token management with pre-computed keys.
//! Every token carries a unique `jti` claim used as the revocation key,
//! and access tokens carry a freshness flag: only tokens minted directly
//! from a password login are fresh.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Role carried in token claims
///
/// An explicit capability enum checked by policy functions, rather than
/// an ad hoc boolean claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
    /// Unique token identifier, the revocation key
    pub jti: Uuid,
    /// True only for access tokens minted directly from a password login
    pub fresh: bool,
    /// Role granted to the subject
    pub role: Role,
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service configuration
#[derive(Clone)]
pub struct JwtConfig {
    pub access_token_expiry_secs: i64,
    pub refresh_token_expiry_secs: i64,
}

/// JWT service for token operations
///
/// Uses pre-computed keys to avoid expensive key derivation on every
/// request. Keys are wrapped in Arc for cheap cloning.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    config: JwtConfig,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    pub fn new(
        secret: &str,
        access_token_expiry_secs: i64,
        refresh_token_expiry_secs: i64,
    ) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            config: JwtConfig {
                access_token_expiry_secs,
                refresh_token_expiry_secs,
            },
        }
    }

    /// Generate an access token for a user
    ///
    /// `fresh` must be true only when the caller has just verified the
    /// user's password; the refresh flow never mints fresh tokens.
    #[inline]
    pub fn generate_access_token(&self, user_id: i64, fresh: bool, role: Role) -> Result<String> {
        self.generate_token(
            user_id,
            "access",
            fresh,
            role,
            self.config.access_token_expiry_secs,
        )
    }

    /// Generate a refresh token for a user
    #[inline]
    pub fn generate_refresh_token(&self, user_id: i64, role: Role) -> Result<String> {
        self.generate_token(
            user_id,
            "refresh",
            false,
            role,
            self.config.refresh_token_expiry_secs,
        )
    }

    /// Generate a token with specified type, freshness, and expiry
    fn generate_token(
        &self,
        user_id: i64,
        token_type: &str,
        fresh: bool,
        role: Role,
        expiry_secs: i64,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiry_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: token_type.to_string(),
            jti: Uuid::new_v4(),
            fresh,
            role,
        };

        encode(&Header::default(), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to generate {} token: {}", token_type, e))
    }

    /// Validate a token and return claims
    #[inline]
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, self.keys.decoding(), &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }

    /// Validate an access token specifically
    #[inline]
    pub fn validate_access_token(&self, token: &str) -> Result<Claims> {
        let claims = self.validate_token(token)?;
        if claims.token_type != "access" {
            return Err(anyhow::anyhow!("Not an access token"));
        }
        Ok(claims)
    }

    /// Validate a refresh token specifically
    #[inline]
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims> {
        let claims = self.validate_token(token)?;
        if claims.token_type != "refresh" {
            return Err(anyhow::anyhow!("Not a refresh token"));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret", 3600, 604800)
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let service = create_test_service();

        let token = service.generate_access_token(1, true, Role::User).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, "1");
        assert_eq!(claims.token_type, "access");
        assert!(claims.fresh);
        assert_eq!(claims.role, Role::User);
    }

    #[test]
    fn test_generate_and_validate_refresh_token() {
        let service = create_test_service();

        let token = service.generate_refresh_token(7, Role::Admin).unwrap();
        let claims = service.validate_refresh_token(&token).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.token_type, "refresh");
        assert!(!claims.fresh);
        assert!(claims.role.is_admin());
    }

    #[test]
    fn test_each_token_gets_a_unique_jti() {
        let service = create_test_service();

        let a = service.generate_access_token(1, true, Role::User).unwrap();
        let b = service.generate_access_token(1, true, Role::User).unwrap();

        let jti_a = service.validate_access_token(&a).unwrap().jti;
        let jti_b = service.validate_access_token(&b).unwrap().jti;
        assert_ne!(jti_a, jti_b);
    }

    #[test]
    fn test_non_fresh_access_token() {
        let service = create_test_service();

        let token = service.generate_access_token(1, false, Role::User).unwrap();
        let claims = service.validate_access_token(&token).unwrap();
        assert!(!claims.fresh);
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let service = create_test_service();

        let token = service.generate_access_token(1, true, Role::User).unwrap();
        let result = service.validate_refresh_token(&token);

        assert!(result.is_err());
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let service = create_test_service();

        let token = service.generate_refresh_token(1, Role::User).unwrap();
        let result = service.validate_access_token(&token);

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        let result = service.validate_token("invalid.token.here");

        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = JwtService::new("other-secret", 3600, 604800);

        let token = service.generate_access_token(1, true, Role::User).unwrap();
        assert!(other.validate_access_token(&token).is_err());
    }
}

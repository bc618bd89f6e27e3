//! API request and response types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Generic message response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token pair returned by login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Single access token returned by refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// User response (never exposes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Store creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
}

/// Store response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreResponse {
    pub id: i64,
    pub name: String,
}

/// Store response with nested items and tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDetailResponse {
    pub id: i64,
    pub name: String,
    pub items: Vec<ItemResponse>,
    pub tags: Vec<TagResponse>,
}

/// Item creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub price: Decimal,
    pub store_id: i64,
}

/// Item update request (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

/// Item response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub store_id: i64,
}

/// Tag creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

/// Tag response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub store_id: i64,
}

/// Response for unlinking a tag from an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagAndItemResponse {
    pub message: String,
    pub item: ItemResponse,
    pub tag: TagResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_tokens_round_trip() {
        let tokens = AuthTokens {
            access_token: "a.b.c".to_string(),
            refresh_token: "d.e.f".to_string(),
        };
        let json = serde_json::to_string(&tokens).unwrap();
        let parsed: AuthTokens = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.access_token, tokens.access_token);
        assert_eq!(parsed.refresh_token, tokens.refresh_token);
    }

    #[test]
    fn test_update_item_request_allows_partial_body() {
        let parsed: UpdateItemRequest = serde_json::from_str(r#"{"price": "4.20"}"#).unwrap();
        assert!(parsed.name.is_none());
        assert_eq!(parsed.price, Some(Decimal::new(420, 2)));
    }

    #[test]
    fn test_error_detail_skips_empty_fields() {
        let detail = ErrorDetail {
            code: "NOT_FOUND".to_string(),
            message: "Item not found".to_string(),
            field: None,
            details: None,
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(!json.contains("field"));
        assert!(!json.contains("details"));
    }
}

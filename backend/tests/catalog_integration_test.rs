//! Integration tests for store/item/tag CRUD and the auth policies on it

mod common;

use axum::http::StatusCode;
use catalog_backend::auth::{JwtService, Role};
use serde_json::json;

fn unique_name(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

fn test_jwt() -> JwtService {
    let config = common::test_config();
    JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry_secs,
        config.jwt.refresh_token_expiry_secs,
    )
}

/// Register a user over HTTP and return (user_id, fresh access token)
async fn register_user(app: &common::TestApp) -> (i64, String) {
    let id = uuid::Uuid::new_v4().simple().to_string();
    let username = format!("cat_{}", &id[..12]);
    let body = json!({
        "username": username,
        "email": format!("{}@example.com", id),
        "password": "SecurePassword123!"
    });
    let (status, _) = app.post("/register", &body.to_string(), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let login = json!({"username": username, "password": "SecurePassword123!"});
    let (status, response) = app.post("/login", &login.to_string(), None).await;
    assert_eq!(status, StatusCode::OK);
    let tokens: serde_json::Value = serde_json::from_str(&response).unwrap();
    let access = tokens["access_token"].as_str().unwrap().to_string();

    let user_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
        .bind(&username)
        .fetch_one(&app.pool)
        .await
        .unwrap();

    (user_id, access)
}

async fn create_store(app: &common::TestApp) -> i64 {
    let body = json!({"name": unique_name("store")});
    let (status, response) = app.post("/stores", &body.to_string(), None).await;
    assert_eq!(status, StatusCode::CREATED);
    let store: serde_json::Value = serde_json::from_str(&response).unwrap();
    store["id"].as_i64().unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_store_crud() {
    let app = common::TestApp::new().await;

    let name = unique_name("store");
    let body = json!({"name": name});
    let (status, response) = app.post("/stores", &body.to_string(), None).await;
    assert_eq!(status, StatusCode::CREATED);
    let store: serde_json::Value = serde_json::from_str(&response).unwrap();
    let store_id = store["id"].as_i64().unwrap();

    // Duplicate name conflicts as 400
    let (status, _) = app.post("/stores", &body.to_string(), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Detail fetch includes empty item/tag lists
    let (status, response) = app.get(&format!("/stores/{}", store_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let detail: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(detail["name"], name.as_str());
    assert_eq!(detail["items"].as_array().unwrap().len(), 0);
    assert_eq!(detail["tags"].as_array().unwrap().len(), 0);

    let (status, _) = app.delete(&format!("/stores/{}", store_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/stores/{}", store_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_item_create_requires_fresh_token() {
    let app = common::TestApp::new().await;
    let (user_id, fresh_access) = register_user(&app).await;
    let store_id = create_store(&app).await;

    let body = json!({"name": "Chair", "price": "19.99", "store_id": store_id});

    // A non-fresh access token (as minted by the refresh flow) is rejected
    let stale = test_jwt()
        .generate_access_token(user_id, false, Role::User)
        .unwrap();
    let (status, _) = app.post("/items", &body.to_string(), Some(&stale)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The login-issued fresh token is accepted
    let (status, response) = app
        .post("/items", &body.to_string(), Some(&fresh_access))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let item: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(item["name"], "Chair");
    assert_eq!(item["store_id"].as_i64().unwrap(), store_id);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_item_create_in_missing_store() {
    let app = common::TestApp::new().await;
    let (_, access) = register_user(&app).await;

    let body = json!({"name": "Chair", "price": "19.99", "store_id": 999_999_999});
    let (status, _) = app.post("/items", &body.to_string(), Some(&access)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_item_update() {
    let app = common::TestApp::new().await;
    let (_, access) = register_user(&app).await;
    let store_id = create_store(&app).await;

    let body = json!({"name": "Desk", "price": "100.00", "store_id": store_id});
    let (status, response) = app.post("/items", &body.to_string(), Some(&access)).await;
    assert_eq!(status, StatusCode::CREATED);
    let item: serde_json::Value = serde_json::from_str(&response).unwrap();
    let item_id = item["id"].as_i64().unwrap();

    // Partial update: price only
    let (status, response) = app
        .put(&format!("/items/{}", item_id), r#"{"price": "80.00"}"#, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let updated: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(updated["name"], "Desk");
    assert_eq!(updated["price"], "80.00");

    // Missing id is a 404
    let (status, _) = app
        .put("/items/999999999", r#"{"price": "1.00"}"#, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_item_delete_requires_admin() {
    let app = common::TestApp::new().await;
    let (user_id, access) = register_user(&app).await;
    let store_id = create_store(&app).await;

    let body = json!({"name": "Lamp", "price": "9.99", "store_id": store_id});
    let (status, response) = app.post("/items", &body.to_string(), Some(&access)).await;
    assert_eq!(status, StatusCode::CREATED);
    let item: serde_json::Value = serde_json::from_str(&response).unwrap();
    let item_id = item["id"].as_i64().unwrap();

    // Plain users cannot delete
    let (status, _) = app.delete(&format!("/items/{}", item_id), Some(&access)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // An admin token can
    let admin = test_jwt()
        .generate_access_token(user_id, true, Role::Admin)
        .unwrap();
    let (status, _) = app.delete(&format!("/items/{}", item_id), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    // Deleting a missing item is a 404
    let (status, _) = app.delete("/items/999999999", Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_tag_lifecycle() {
    let app = common::TestApp::new().await;
    let (_, access) = register_user(&app).await;
    let store_id = create_store(&app).await;

    // Create a tag
    let (status, response) = app
        .post(
            &format!("/stores/{}/tags", store_id),
            r#"{"name": "furniture"}"#,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let tag: serde_json::Value = serde_json::from_str(&response).unwrap();
    let tag_id = tag["id"].as_i64().unwrap();

    // Duplicate tag name within the store conflicts
    let (status, _) = app
        .post(
            &format!("/stores/{}/tags", store_id),
            r#"{"name": "furniture"}"#,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Create an item and link the tag
    let body = json!({"name": "Sofa", "price": "250.00", "store_id": store_id});
    let (status, response) = app.post("/items", &body.to_string(), Some(&access)).await;
    assert_eq!(status, StatusCode::CREATED);
    let item: serde_json::Value = serde_json::from_str(&response).unwrap();
    let item_id = item["id"].as_i64().unwrap();

    let (status, _) = app
        .post(&format!("/items/{}/tags/{}", item_id, tag_id), "{}", None)
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // A tag with linked items cannot be deleted
    let (status, _) = app.delete(&format!("/tags/{}", tag_id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unlink, then delete succeeds with 202
    let (status, response) = app
        .delete(&format!("/items/{}/tags/{}", item_id, tag_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let unlinked: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(unlinked["message"], "Item removed from tag");

    let (status, _) = app.delete(&format!("/tags/{}", tag_id), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, _) = app.get(&format!("/tags/{}", tag_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_tags_of_missing_store() {
    let app = common::TestApp::new().await;

    let (status, _) = app.get("/stores/999999999/tags", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

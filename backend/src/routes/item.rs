//! Item routes
//!
//! Reads require a valid unrevoked access token; creation additionally
//! requires a fresh token, and deletion requires the admin role.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_shared::types::{
    CreateItemRequest, ItemResponse, MessageResponse, UpdateItemRequest,
};

/// Create item routes
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:item_id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

/// GET /items - list all items (requires authentication)
async fn list_items(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<ItemResponse>>> {
    let items = CatalogService::list_items(state.db()).await?;
    Ok(Json(items))
}

/// POST /items - create an item (requires a fresh token)
async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<ItemResponse>)> {
    auth.require_fresh()?;
    let item = CatalogService::create_item(state.db(), req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /items/{id} - fetch an item (requires authentication)
async fn get_item(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(item_id): Path<i64>,
) -> ApiResult<Json<ItemResponse>> {
    let item = CatalogService::get_item(state.db(), item_id).await?;
    Ok(Json(item))
}

/// PUT /items/{id} - partial update of name and/or price
async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(req): Json<UpdateItemRequest>,
) -> ApiResult<Json<ItemResponse>> {
    let item = CatalogService::update_item(state.db(), item_id, req).await?;
    Ok(Json(item))
}

/// DELETE /items/{id} - delete an item (requires the admin role)
async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(item_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    auth.require_admin()?;
    let message = CatalogService::delete_item(state.db(), item_id).await?;
    Ok(Json(message))
}

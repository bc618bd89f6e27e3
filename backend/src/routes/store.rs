//! Store routes

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
    CreateStoreRequest, MessageResponse, StoreDetailResponse, StoreResponse,
};

/// Create store routes
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/stores", get(list_stores).post(create_store))
        .route("/stores/:store_id", get(get_store).delete(delete_store))
}

/// GET /stores - list all stores
async fn list_stores(State(state): State<AppState>) -> ApiResult<Json<Vec<StoreResponse>>> {
    let stores = CatalogService::list_stores(state.db()).await?;
    Ok(Json(stores))
}

/// POST /stores - create a store (duplicate name responds 400)
async fn create_store(
    State(state): State<AppState>,
    Json(req): Json<CreateStoreRequest>,
) -> ApiResult<(StatusCode, Json<StoreResponse>)> {
    let store = CatalogService::create_store(state.db(), req).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

/// GET /stores/{id} - fetch a store with its items and tags
async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
) -> ApiResult<Json<StoreDetailResponse>> {
    let store = CatalogService::get_store(state.db(), store_id).await?;
    Ok(Json(store))
}

/// DELETE /stores/{id}
async fn delete_store(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = CatalogService::delete_store(state.db(), store_id).await?;
    Ok(Json(message))
}

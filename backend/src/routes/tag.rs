//! Tag routes, including item/tag linking

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
    CreateTagRequest, MessageResponse, TagAndItemResponse, TagResponse,
};

/// Create tag routes
pub fn tag_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/stores/:store_id/tags",
            get(list_tags_in_store).post(create_tag),
        )
        .route("/tags/:tag_id", get(get_tag).delete(delete_tag))
        .route(
            "/items/:item_id/tags/:tag_id",
            axum::routing::post(link_tag).delete(unlink_tag),
        )
}

/// GET /stores/{id}/tags - list a store's tags
async fn list_tags_in_store(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
) -> ApiResult<Json<Vec<TagResponse>>> {
    let tags = CatalogService::list_tags_in_store(state.db(), store_id).await?;
    Ok(Json(tags))
}

/// POST /stores/{id}/tags - create a tag (duplicate name in store responds 400)
async fn create_tag(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
    Json(req): Json<CreateTagRequest>,
) -> ApiResult<(StatusCode, Json<TagResponse>)> {
    let tag = CatalogService::create_tag(state.db(), store_id, req).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// GET /tags/{id} - fetch a tag
async fn get_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<i64>,
) -> ApiResult<Json<TagResponse>> {
    let tag = CatalogService::get_tag(state.db(), tag_id).await?;
    Ok(Json(tag))
}

/// DELETE /tags/{id} - delete a tag if no item is linked to it
///
/// Responds 202 on success, 400 while items remain linked.
async fn delete_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<i64>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let message = CatalogService::delete_tag(state.db(), tag_id).await?;
    Ok((StatusCode::ACCEPTED, Json(message)))
}

/// POST /items/{item_id}/tags/{tag_id} - link a tag to an item
async fn link_tag(
    State(state): State<AppState>,
    Path((item_id, tag_id)): Path<(i64, i64)>,
) -> ApiResult<(StatusCode, Json<TagResponse>)> {
    let tag = CatalogService::link_tag_to_item(state.db(), item_id, tag_id).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// DELETE /items/{item_id}/tags/{tag_id} - unlink a tag from an item
async fn unlink_tag(
    State(state): State<AppState>,
    Path((item_id, tag_id)): Path<(i64, i64)>,
) -> ApiResult<Json<TagAndItemResponse>> {
    let response = CatalogService::unlink_tag_from_item(state.db(), item_id, tag_id).await?;
    Ok(Json(response))
}

//! Catalog service: store, item, and tag operations
//!
//! Plain data-access glue over the catalog repositories: existence
//! checks, inserts, deletes, and the item/tag link rules.

use crate::error::ApiError;
use crate::repositories::{
    ItemRecord, ItemRepository, StoreRepository, TagRecord, TagRepository, UpdateItem,
};
use catalog_shared::types::{
    CreateItemRequest, CreateStoreRequest, CreateTagRequest, ItemResponse, MessageResponse,
    StoreDetailResponse, StoreResponse, TagAndItemResponse, TagResponse, UpdateItemRequest,
};
use catalog_shared::validation;
use sqlx::PgPool;

fn item_response(item: ItemRecord) -> ItemResponse {
    ItemResponse {
        id: item.id,
        name: item.name,
        price: item.price,
        store_id: item.store_id,
    }
}

fn tag_response(tag: TagRecord) -> TagResponse {
    TagResponse {
        id: tag.id,
        name: tag.name,
        store_id: tag.store_id,
    }
}

/// Catalog service for store/item/tag CRUD
pub struct CatalogService;

impl CatalogService {
    // -- stores -------------------------------------------------------

    /// Create a store; duplicate names conflict
    pub async fn create_store(
        pool: &PgPool,
        req: CreateStoreRequest,
    ) -> Result<StoreResponse, ApiError> {
        validation::validate_name(&req.name).map_err(ApiError::Validation)?;

        if StoreRepository::name_exists(pool, &req.name)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict(
                "Store with that name already exists".to_string(),
            ));
        }

        let store = StoreRepository::create(pool, &req.name)
            .await
            .map_err(|e| super::map_insert_error(e, "Store with that name already exists"))?;

        Ok(StoreResponse {
            id: store.id,
            name: store.name,
        })
    }

    /// List all stores
    pub async fn list_stores(pool: &PgPool) -> Result<Vec<StoreResponse>, ApiError> {
        let stores = StoreRepository::list(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(stores
            .into_iter()
            .map(|s| StoreResponse {
                id: s.id,
                name: s.name,
            })
            .collect())
    }

    /// Fetch a store with its items and tags
    pub async fn get_store(pool: &PgPool, store_id: i64) -> Result<StoreDetailResponse, ApiError> {
        let store = StoreRepository::find_by_id(pool, store_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Store not found".to_string()))?;

        let items = ItemRepository::list_by_store(pool, store_id)
            .await
            .map_err(ApiError::Internal)?;
        let tags = TagRepository::list_by_store(pool, store_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(StoreDetailResponse {
            id: store.id,
            name: store.name,
            items: items.into_iter().map(item_response).collect(),
            tags: tags.into_iter().map(tag_response).collect(),
        })
    }

    /// Delete a store (items and tags cascade)
    pub async fn delete_store(pool: &PgPool, store_id: i64) -> Result<MessageResponse, ApiError> {
        let deleted = StoreRepository::delete(pool, store_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Store not found".to_string()));
        }

        Ok(MessageResponse::new("Store deleted"))
    }

    // -- items --------------------------------------------------------

    /// Create an item in a store
    pub async fn create_item(
        pool: &PgPool,
        req: CreateItemRequest,
    ) -> Result<ItemResponse, ApiError> {
        validation::validate_name(&req.name).map_err(ApiError::Validation)?;
        validation::validate_price(req.price).map_err(ApiError::Validation)?;

        if StoreRepository::find_by_id(pool, req.store_id)
            .await
            .map_err(ApiError::Internal)?
            .is_none()
        {
            return Err(ApiError::NotFound("Store not found".to_string()));
        }

        let item = ItemRepository::create(pool, &req.name, req.price, req.store_id)
            .await
            .map_err(ApiError::Database)?;

        Ok(item_response(item))
    }

    /// List all items
    pub async fn list_items(pool: &PgPool) -> Result<Vec<ItemResponse>, ApiError> {
        let items = ItemRepository::list(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(items.into_iter().map(item_response).collect())
    }

    /// Fetch an item by id
    pub async fn get_item(pool: &PgPool, item_id: i64) -> Result<ItemResponse, ApiError> {
        let item = ItemRepository::find_by_id(pool, item_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

        Ok(item_response(item))
    }

    /// Partially update an item's name and/or price
    pub async fn update_item(
        pool: &PgPool,
        item_id: i64,
        req: UpdateItemRequest,
    ) -> Result<ItemResponse, ApiError> {
        if let Some(name) = &req.name {
            validation::validate_name(name).map_err(ApiError::Validation)?;
        }
        if let Some(price) = req.price {
            validation::validate_price(price).map_err(ApiError::Validation)?;
        }

        let updates = UpdateItem {
            name: req.name,
            price: req.price,
        };

        let item = ItemRepository::update(pool, item_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

        Ok(item_response(item))
    }

    /// Delete an item
    pub async fn delete_item(pool: &PgPool, item_id: i64) -> Result<MessageResponse, ApiError> {
        let deleted = ItemRepository::delete(pool, item_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Item not found".to_string()));
        }

        Ok(MessageResponse::new("Item deleted"))
    }

    // -- tags ---------------------------------------------------------

    /// List the tags of a store
    pub async fn list_tags_in_store(
        pool: &PgPool,
        store_id: i64,
    ) -> Result<Vec<TagResponse>, ApiError> {
        if StoreRepository::find_by_id(pool, store_id)
            .await
            .map_err(ApiError::Internal)?
            .is_none()
        {
            return Err(ApiError::NotFound("Store not found".to_string()));
        }

        let tags = TagRepository::list_by_store(pool, store_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(tags.into_iter().map(tag_response).collect())
    }

    /// Create a tag in a store; duplicate names within a store conflict
    pub async fn create_tag(
        pool: &PgPool,
        store_id: i64,
        req: CreateTagRequest,
    ) -> Result<TagResponse, ApiError> {
        validation::validate_name(&req.name).map_err(ApiError::Validation)?;

        if StoreRepository::find_by_id(pool, store_id)
            .await
            .map_err(ApiError::Internal)?
            .is_none()
        {
            return Err(ApiError::NotFound("Store not found".to_string()));
        }

        if TagRepository::name_exists_in_store(pool, &req.name, store_id)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict(
                "Tag with that name already exists".to_string(),
            ));
        }

        let tag = TagRepository::create(pool, &req.name, store_id)
            .await
            .map_err(|e| super::map_insert_error(e, "Tag with that name already exists"))?;

        Ok(tag_response(tag))
    }

    /// Fetch a tag by id
    pub async fn get_tag(pool: &PgPool, tag_id: i64) -> Result<TagResponse, ApiError> {
        let tag = TagRepository::find_by_id(pool, tag_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Tag not found".to_string()))?;

        Ok(tag_response(tag))
    }

    /// Delete a tag, refused while any item is still linked to it
    pub async fn delete_tag(pool: &PgPool, tag_id: i64) -> Result<MessageResponse, ApiError> {
        if TagRepository::find_by_id(pool, tag_id)
            .await
            .map_err(ApiError::Internal)?
            .is_none()
        {
            return Err(ApiError::NotFound("Tag not found".to_string()));
        }

        if TagRepository::has_items(pool, tag_id)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::BadRequest(
                "Could not delete tag. Make sure tag is not associated with any items, then try again"
                    .to_string(),
            ));
        }

        TagRepository::delete(pool, tag_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(MessageResponse::new("Tag deleted"))
    }

    /// Link a tag to an item
    pub async fn link_tag_to_item(
        pool: &PgPool,
        item_id: i64,
        tag_id: i64,
    ) -> Result<TagResponse, ApiError> {
        if ItemRepository::find_by_id(pool, item_id)
            .await
            .map_err(ApiError::Internal)?
            .is_none()
        {
            return Err(ApiError::NotFound("Item not found".to_string()));
        }

        let tag = TagRepository::find_by_id(pool, tag_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Tag not found".to_string()))?;

        TagRepository::link_item(pool, item_id, tag_id)
            .await
            .map_err(ApiError::Database)?;

        Ok(tag_response(tag))
    }

    /// Unlink a tag from an item
    pub async fn unlink_tag_from_item(
        pool: &PgPool,
        item_id: i64,
        tag_id: i64,
    ) -> Result<TagAndItemResponse, ApiError> {
        let item = ItemRepository::find_by_id(pool, item_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

        let tag = TagRepository::find_by_id(pool, tag_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Tag not found".to_string()))?;

        let unlinked = TagRepository::unlink_item(pool, item_id, tag_id)
            .await
            .map_err(ApiError::Internal)?;

        if !unlinked {
            return Err(ApiError::NotFound("Tag not linked to item".to_string()));
        }

        Ok(TagAndItemResponse {
            message: "Item removed from tag".to_string(),
            item: item_response(item),
            tag: tag_response(tag),
        })
    }
}

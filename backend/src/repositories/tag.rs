//! Tag repository, including the item/tag link table

use anyhow::Result;
use sqlx::PgPool;

/// Tag record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagRecord {
    pub id: i64,
    pub name: String,
    pub store_id: i64,
}

/// Tag repository for database operations
pub struct TagRepository;

impl TagRepository {
    /// Create a new tag within a store
    pub async fn create(
        pool: &PgPool,
        name: &str,
        store_id: i64,
    ) -> Result<TagRecord, sqlx::Error> {
        sqlx::query_as::<_, TagRecord>(
            r#"
            INSERT INTO tags (name, store_id)
            VALUES ($1, $2)
            RETURNING id, name, store_id
            "#,
        )
        .bind(name)
        .bind(store_id)
        .fetch_one(pool)
        .await
    }

    /// Find tag by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<TagRecord>> {
        let tag = sqlx::query_as::<_, TagRecord>(
            r#"
            SELECT id, name, store_id
            FROM tags
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(tag)
    }

    /// List all tags belonging to a store
    pub async fn list_by_store(pool: &PgPool, store_id: i64) -> Result<Vec<TagRecord>> {
        let tags = sqlx::query_as::<_, TagRecord>(
            r#"
            SELECT id, name, store_id
            FROM tags
            WHERE store_id = $1
            ORDER BY id
            "#,
        )
        .bind(store_id)
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }

    /// Check if a tag name is already taken within a store
    pub async fn name_exists_in_store(pool: &PgPool, name: &str, store_id: i64) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM tags WHERE name = $1 AND store_id = $2)
            "#,
        )
        .bind(name)
        .bind(store_id)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Check whether any item is linked to the tag
    pub async fn has_items(pool: &PgPool, tag_id: i64) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM item_tags WHERE tag_id = $1)
            "#,
        )
        .bind(tag_id)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Delete a tag, returning whether a row was removed
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Link a tag to an item
    pub async fn link_item(pool: &PgPool, item_id: i64, tag_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO item_tags (item_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT (item_id, tag_id) DO NOTHING
            "#,
        )
        .bind(item_id)
        .bind(tag_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Unlink a tag from an item, returning whether a link existed
    pub async fn unlink_item(pool: &PgPool, item_id: i64, tag_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM item_tags
            WHERE item_id = $1 AND tag_id = $2
            "#,
        )
        .bind(item_id)
        .bind(tag_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

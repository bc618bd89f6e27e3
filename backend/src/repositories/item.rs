//! Item repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Item record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemRecord {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub store_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Input for a partial item update
#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

/// Item repository for database operations
pub struct ItemRepository;

impl ItemRepository {
    /// Create a new item in a store
    pub async fn create(
        pool: &PgPool,
        name: &str,
        price: Decimal,
        store_id: i64,
    ) -> Result<ItemRecord, sqlx::Error> {
        sqlx::query_as::<_, ItemRecord>(
            r#"
            INSERT INTO items (name, price, store_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, store_id, created_at
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(store_id)
        .fetch_one(pool)
        .await
    }

    /// Find item by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ItemRecord>> {
        let item = sqlx::query_as::<_, ItemRecord>(
            r#"
            SELECT id, name, price, store_id, created_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// List all items
    pub async fn list(pool: &PgPool) -> Result<Vec<ItemRecord>> {
        let items = sqlx::query_as::<_, ItemRecord>(
            r#"
            SELECT id, name, price, store_id, created_at
            FROM items
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// List all items belonging to a store
    pub async fn list_by_store(pool: &PgPool, store_id: i64) -> Result<Vec<ItemRecord>> {
        let items = sqlx::query_as::<_, ItemRecord>(
            r#"
            SELECT id, name, price, store_id, created_at
            FROM items
            WHERE store_id = $1
            ORDER BY id
            "#,
        )
        .bind(store_id)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// Partially update an item; None when the id does not exist
    pub async fn update(pool: &PgPool, id: i64, updates: UpdateItem) -> Result<Option<ItemRecord>> {
        let item = sqlx::query_as::<_, ItemRecord>(
            r#"
            UPDATE items SET
                name = COALESCE($2, name),
                price = COALESCE($3, price)
            WHERE id = $1
            RETURNING id, name, price, store_id, created_at
            "#,
        )
        .bind(id)
        .bind(updates.name)
        .bind(updates.price)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// Delete an item, returning whether a row was removed
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

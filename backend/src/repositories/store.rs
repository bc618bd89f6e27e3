//! Store repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Store record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreRecord {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Store repository for database operations
pub struct StoreRepository;

impl StoreRepository {
    /// Create a new store
    pub async fn create(pool: &PgPool, name: &str) -> Result<StoreRecord, sqlx::Error> {
        sqlx::query_as::<_, StoreRecord>(
            r#"
            INSERT INTO stores (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Find store by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<StoreRecord>> {
        let store = sqlx::query_as::<_, StoreRecord>(
            r#"
            SELECT id, name, created_at
            FROM stores
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(store)
    }

    /// List all stores
    pub async fn list(pool: &PgPool) -> Result<Vec<StoreRecord>> {
        let stores = sqlx::query_as::<_, StoreRecord>(
            r#"
            SELECT id, name, created_at
            FROM stores
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(stores)
    }

    /// Check if a store name is already taken
    pub async fn name_exists(pool: &PgPool, name: &str) -> Result<bool> {
        let result =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM stores WHERE name = $1)")
                .bind(name)
                .fetch_one(pool)
                .await?;

        Ok(result)
    }

    /// Delete a store, returning whether a row was removed
    ///
    /// Items and tags belonging to the store go with it (FK cascade).
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

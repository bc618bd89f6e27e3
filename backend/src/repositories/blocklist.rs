//! Revoked-token blocklist repository
//!
//! Rows are insert-only: a `jti` that lands here permanently invalidates
//! that token, regardless of its cryptographic expiry. Entries are never
//! pruned.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Blocklist repository for revoked token identifiers
pub struct BlocklistRepository;

impl BlocklistRepository {
    /// Record a token identifier as revoked
    ///
    /// Idempotent at the storage level: revoking an already-revoked jti
    /// is a no-op rather than a unique violation.
    pub async fn insert(pool: &PgPool, jti: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO blocklist (jti)
            VALUES ($1)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(jti)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Check whether a token identifier has been revoked
    pub async fn is_revoked(pool: &PgPool, jti: Uuid) -> Result<bool> {
        let revoked = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM blocklist WHERE jti = $1)
            "#,
        )
        .bind(jti)
        .fetch_one(pool)
        .await?;

        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require database - see backend/tests/
}

//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the token issuer, and the email queue.

pub mod catalog;
pub mod user;

pub use catalog::CatalogService;
pub use user::UserService;

use crate::error::ApiError;

/// Map an insert failure, converting a unique violation into a conflict
///
/// Existence pre-checks race with concurrent inserts; the storage-level
/// unique constraint is the actual safety net, and this keeps the loser
/// of that race on the same wire contract as the pre-check.
pub(crate) fn map_insert_error(err: sqlx::Error, conflict_msg: &str) -> ApiError {
    match &err {
        sqlx::Error::Database(db_err)
            if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            ApiError::Conflict(conflict_msg.to_string())
        }
        _ => ApiError::Database(err),
    }
}

//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod blocklist;
pub mod item;
pub mod store;
pub mod tag;
pub mod user;

pub use blocklist::BlocklistRepository;
pub use item::{ItemRecord, ItemRepository, UpdateItem};
pub use store::{StoreRecord, StoreRepository};
pub use tag::{TagRecord, TagRepository};
pub use user::{UserRecord, UserRepository};

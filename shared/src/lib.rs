//! Catalog Shared Library
//!
//! This crate contains the request/response types and input validation
//! used by the catalog backend and its integration tests.

pub mod types;
pub mod validation;

// Re-export commonly used items
pub use types::*;

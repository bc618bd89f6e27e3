//! Authentication module
//!
//! Provides JWT-based authentication with argon2 password hashing and
//! a persistent token-revocation blocklist checked on every request.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, Role};
pub use middleware::{AuthUser, RefreshUser};
pub use password::PasswordService;

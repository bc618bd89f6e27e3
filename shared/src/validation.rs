//! Input validation functions
//!
//! Boundary validation for user-supplied fields. Requests are parsed into
//! typed structs first; these checks cover the constraints the types alone
//! cannot express.

use rust_decimal::Decimal;

/// Validate username: 3-80 chars, alphanumeric plus `_`, `-`, `.`
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if username.len() > 80 {
        return Err("Username too long".to_string());
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err("Username contains invalid characters".to_string());
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    // Basic email regex check
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a store/item/tag name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > 255 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate an item price
pub fn validate_price(price: Decimal) -> Result<(), String> {
    if price.is_sign_negative() {
        return Err("Price cannot be negative".to_string());
    }
    if price > Decimal::new(1_000_000_000, 0) {
        return Err("Price unreasonably high".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("bob.smith-2").is_ok());
    }

    #[test]
    fn test_invalid_username() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(81)).is_err());
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("alice@example.com").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a b@example.com").is_err());
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough pw").is_ok());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }

    #[test]
    fn test_name_bounds() {
        assert!(validate_name("Chair").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"n".repeat(256)).is_err());
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate_price(Decimal::new(1999, 2)).is_ok());
        assert!(validate_price(Decimal::new(-1, 0)).is_err());
    }

    proptest! {
        /// Any non-negative price below the cap validates
        #[test]
        fn prop_reasonable_prices_validate(cents in 0i64..100_000_000) {
            prop_assert!(validate_price(Decimal::new(cents, 2)).is_ok());
        }

        /// Usernames made of allowed characters within bounds validate
        #[test]
        fn prop_well_formed_usernames_validate(name in "[a-zA-Z0-9_.-]{3,80}") {
            prop_assert!(validate_username(&name).is_ok());
        }
    }
}

//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! All checks run before any datastore write.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item, category, table, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes (order note, etc.)
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Human-facing menu codes
pub const MAX_MENU_CODE_LEN: usize = 32;

// ── Numeric limits ──────────────────────────────────────────────────

/// Maximum price per menu item in minor units (1,000,000.00)
pub const MAX_PRICE_MINOR: i64 = 100_000_000;

/// Maximum quantity per line item
pub const MAX_QUANTITY: i32 = 9999;

/// Maximum guests per table opening
pub const MAX_PEOPLE_COUNT: i32 = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a price in minor units: non-negative and within bounds.
pub fn validate_price(price: i64, field: &str) -> Result<(), AppError> {
    if price < 0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {price}"
        )));
    }
    if price > MAX_PRICE_MINOR {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE_MINOR}), got {price}"
        )));
    }
    Ok(())
}

/// Validate a line-item quantity: positive and within bounds.
pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

/// Validate a people count for table opening.
pub fn validate_people_count(people_count: i32) -> Result<(), AppError> {
    if people_count <= 0 {
        return Err(AppError::validation(format!(
            "people_count must be positive, got {people_count}"
        )));
    }
    if people_count > MAX_PEOPLE_COUNT {
        return Err(AppError::validation(format!(
            "people_count exceeds maximum allowed ({MAX_PEOPLE_COUNT}), got {people_count}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Margherita", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(300), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_price_bounds() {
        assert!(validate_price(0, "price").is_ok());
        assert!(validate_price(1200, "price").is_ok());
        assert!(validate_price(-1, "price").is_err());
        assert!(validate_price(MAX_PRICE_MINOR + 1, "price").is_err());
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }
}

//! # Validation Module
//!
//! Input validation for products, users, and sale lines.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: Presentation          basic format checks, immediate feedback
//! Layer 2: Service (Rust)        THIS MODULE - business rule validation
//! Layer 3: Database (SQLite)     NOT NULL / CHECK constraints
//! ```
//!
//! The stock-sufficiency check ([`check_stock`]) is deliberately advisory:
//! the presentation layer calls it before checkout, but recording a sale
//! decrements stock unconditionally (see the sale service docs).

use crate::error::{CoreError, ValidationError};
use crate::types::Product;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product name: non-empty, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a product category: non-empty, at most 100 characters.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if category.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a shelf price in cents: must not be negative.
pub fn validate_price(price_cents: i64) -> ValidationResult<()> {
    if price_cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock level for direct inventory edits: must not be negative.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Sale Validators
// =============================================================================

/// Validates a line quantity: between 1 and [`MAX_ITEM_QUANTITY`].
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 || quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Advisory stock check for the caller driving the cart UI.
///
/// Returns `InsufficientStock` when the requested quantity exceeds what is
/// on the shelf. The sale service does NOT repeat this check.
pub fn check_stock(product: &Product, requested: i64) -> Result<(), CoreError> {
    if product.stock < requested {
        return Err(CoreError::InsufficientStock {
            name: product.name.clone(),
            available: product.stock,
            requested,
        });
    }
    Ok(())
}

// =============================================================================
// User Validators
// =============================================================================

/// Validates a username: non-empty, at most 50 characters.
///
/// Note: this does NOT check uniqueness. The store enforces none and callers
/// must not rely on it.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates a password: non-empty. (Plaintext storage is a flagged,
/// known weakness; see the `User` type docs.)
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn product_name_rules() {
        assert!(validate_product_name("Milk 1L").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn price_must_not_be_negative() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(1099).is_ok());
        assert!(validate_price(-1).is_err());
    }

    #[test]
    fn quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn advisory_stock_check() {
        let product = Product {
            id: "p1".to_string(),
            name: "Milk".to_string(),
            category: "Dairy".to_string(),
            price_cents: 1000,
            stock: 5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(check_stock(&product, 5).is_ok());
        assert!(matches!(
            check_stock(&product, 6),
            Err(CoreError::InsufficientStock { available: 5, requested: 6, .. })
        ));
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("osama").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username(&"u".repeat(51)).is_err());
    }
}

//! # Validation Module
//!
//! Input validation for listing forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                │
//! │  └── Immediate field-level feedback                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Caller of the mock API                                       │
//! │  └── THIS MODULE: listing rules before `products().add(..)`            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Mock API                                                     │
//! │  └── Accepts anything (caller is responsible)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mandi_core::validation::validate_new_product;
//! use mandi_core::NewProduct;
//!
//! let listing = NewProduct {
//!     name: "Alphonso Mangoes".to_string(),
//!     price: 600.0,
//!     unit: "dozen".to_string(),
//!     farmer: "Konkan Orchards".to_string(),
//!     stock: 40,
//!     description: "Hand-picked Ratnagiri Alphonso, ready to eat.".to_string(),
//! };
//! assert!(validate_new_product(&listing).is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::NewProduct;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_NAME_LEN: usize = 200;

/// Shortest accepted listing description.
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// Longest accepted search query.
pub const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a listing description (at least 20 characters after trimming).
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::TooShort {
            field: "description".to_string(),
            min: MIN_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches every listing)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price in rupees (finite and greater than zero).
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "price".to_string(),
        });
    }

    if price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates the available quantity (greater than zero).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a complete listing before it is submitted.
///
/// Returns the first failing rule, checked in form order:
/// name, description, stock, unit, price.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_description(&product.description)?;
    validate_stock(product.stock)?;

    if product.unit.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "unit".to_string(),
        });
    }

    validate_price(product.price)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_listing() -> NewProduct {
        NewProduct {
            name: "Fresh Bananas".to_string(),
            price: 45.0,
            unit: "dozen".to_string(),
            farmer: "Green Orchard".to_string(),
            stock: 200,
            description: "Sweet ripe bananas from the orchard.".to_string(),
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Brown Rice (5kg)").is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_description_minimum_length() {
        assert_eq!(
            validate_description("Too short"),
            Err(ValidationError::TooShort {
                field: "description".to_string(),
                min: 20
            })
        );
        assert!(validate_description("Twenty characters ok").is_ok());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.5).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-3.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  rice ").unwrap(), "rice");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_new_product() {
        assert!(validate_new_product(&valid_listing()).is_ok());

        let mut listing = valid_listing();
        listing.stock = 0;
        assert_eq!(
            validate_new_product(&listing),
            Err(ValidationError::MustBePositive {
                field: "stock".to_string()
            })
        );

        let mut listing = valid_listing();
        listing.unit = String::new();
        assert!(matches!(
            validate_new_product(&listing),
            Err(ValidationError::Required { .. })
        ));
    }
}

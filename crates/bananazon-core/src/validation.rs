//! # Validation Module
//!
//! Input rules shared by the cart and the storefront views.
//!
//! ## Quantity Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Views                                                         │
//! │  └── Decrement buttons call clamp_quantity() so "-" stops at 1          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart (bananazon-core::cart)                                   │
//! │  └── add_item / update_quantity ignore anything below MIN_QUANTITY      │
//! │                                                                         │
//! │  Removing a line is always an explicit remove_item, never "set to 0".   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Smallest quantity a line item may hold.
pub const MIN_QUANTITY: i64 = 1;

/// Longest accepted search query, in characters.
pub const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// Quantity
// =============================================================================

/// Validates a quantity before a cart operation.
///
/// ## Example
/// ```rust
/// use bananazon_core::validation::validate_quantity;
///
/// assert!(validate_quantity(3).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<i64> {
    if quantity < MIN_QUANTITY {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(quantity)
}

/// Floors a quantity at [`MIN_QUANTITY`].
///
/// ## Example
/// ```rust
/// use bananazon_core::validation::clamp_quantity;
///
/// // Cart page "-" button on a line holding 1
/// assert_eq!(clamp_quantity(1 - 1), 1);
/// assert_eq!(clamp_quantity(4), 4);
/// ```
#[inline]
pub fn clamp_quantity(quantity: i64) -> i64 {
    quantity.max(MIN_QUANTITY)
}

// =============================================================================
// Search
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters after trimming
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
// Unit Tests
// =============================================================================

//! # Validation Module
//!
//! Argument checks for cart mutations.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart / remove_from_cart / delete_cart                          │
//! │                                                                         │
//! │  username == ""  ──────► Required { field: "username" }                │
//! │  product_id == 0 ──────► MustBeNonZero { field: "product_id" }         │
//! │                                                                         │
//! │  Nothing else is checked: whitespace-only usernames and negative ids   │
//! │  pass through to the store unchanged.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tote_core::validation::{validate_username, validate_product_id};
//!
//! assert!(validate_username("bob").is_ok());
//! assert!(validate_product_id(0).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a cart owner's username.
///
/// ## Rules
/// - Must not be empty
/// - Not trimmed: `" "` is a valid username as far as this crate cares
pub fn validate_username(username: &str) -> ValidationResult<()> {
    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    Ok(())
}

/// Validates a product id.
///
/// ## Rules
/// - Must not be zero
pub fn validate_product_id(product_id: i64) -> ValidationResult<()> {
    if product_id == 0 {
        return Err(ValidationError::MustBeNonZero {
            field: "product_id".to_string(),
        });
    }

    Ok(())
}

/// Validates the argument pair of an add/remove call.
pub fn validate_mutation(username: &str, product_id: i64) -> ValidationResult<()> {
    validate_username(username)?;
    validate_product_id(product_id)
}

// =============================================================================
// Unit Tests
// =============================================================================

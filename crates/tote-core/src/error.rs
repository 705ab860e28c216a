//! # Error Types
//!
//! Domain-specific error types for tote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tote-core errors (this file)                                          │
//! │  ├── CoreError        - Contract violations and collaborator failures  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tote-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                        (converted into CoreError::Storage)             │
//! │                                                                         │
//! │  Flow: DbError → CoreError::Storage → caller                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error Here
//! Dirty data coming from storage never becomes an error. A row whose
//! contents do not decode, a user with no rows, a product id the catalog
//! does not know, and a mutation with an empty username are all absorbed
//! by the accessor. Only [`CoreError::MalformedCart`] (a caller handing
//! `Cart::load` a bad mapping) and collaborator failures reach the caller.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core errors surfaced to callers of the cart accessor.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `Cart::load` was given a mapping it cannot turn into a cart.
    ///
    /// ## When This Occurs
    /// - A required key (`id`, `username`, `contents`, `cost`) is missing
    /// - A value cannot be decoded into the field's type
    /// - The input is not a mapping at all
    #[error("Malformed cart mapping: {reason}")]
    MalformedCart { reason: String },

    /// A collaborator (cart store or product catalog) failed.
    ///
    /// The accessor never retries; the collaborator owns its own recovery.
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CoreError {
    /// Wraps any collaborator error as [`CoreError::Storage`].
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        CoreError::Storage(Box::new(err))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Never returned by the accessor: it logs the reason and skips the
/// mutation. Other callers can reuse the same rules with an error signal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be zero.
    #[error("{field} must be non-zero")]
    MustBeNonZero { field: String },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

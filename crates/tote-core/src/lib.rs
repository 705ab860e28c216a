//! # tote-core: Shopping-Cart Accessor
//!
//! Loads a user's cart from a store, resolves the stored product ids into
//! product records through a bounded cache, and forwards add/remove/delete
//! calls after checking their arguments.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tote Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Caller (CLI, web handler, ...)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tote-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ accessor  │  │ contents  │  │  catalog  │  │   types   │  │   │
//! │  │   │ get_cart  │  │  "[1,2]"  │  │ LRU memo  │  │   Cart    │  │   │
//! │  │   │ add/remove│  │  → [1,2]  │  │ of lookups│  │  Product  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • collaborators are the CartStore / ProductCatalog    │   │
//! │  │   traits                                                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tote-db (Database Layer)                     │   │
//! │  │         SQLite cart rows, product catalog, migrations           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`accessor`] - `CartAccessor`: read path and mutation passthroughs
//! - [`catalog`] - `CachedCatalog`: LRU-memoized product lookups
//! - [`contents`] - Decoder/encoder for the stored id lists
//! - [`lru`] - The fixed-capacity LRU map
//! - [`store`] - `CartStore` and `ProductCatalog` traits
//! - [`types`] - `Cart`, `CartRow`, `Product`
//! - [`money`] - Integer-cents `Money`
//! - [`validation`] - Mutation argument checks
//! - [`error`] - Error types
//!
//! ## Error Policy
//!
//! Dirty data from storage degrades the result (empty or partial) and is
//! logged at `debug`. Only a malformed `Cart::load` mapping and
//! collaborator failures come back as errors.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accessor;
pub mod catalog;
pub mod contents;
pub mod error;
pub mod lru;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use accessor::CartAccessor;
pub use catalog::{CacheStats, CachedCatalog};
pub use contents::{format_contents, parse_contents, try_parse_contents};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use store::{CartStore, ProductCatalog};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of catalog answers kept by [`CachedCatalog`].
pub const DEFAULT_PRODUCT_CACHE_CAPACITY: std::num::NonZeroUsize =
    std::num::NonZeroUsize::MIN.saturating_add(999);

//! # Collaborator Traits
//!
//! The two outside services the cart accessor talks to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CartAccessor ───► CartStore        rows keyed by username            │
//! │        │             ├── get_cart                                      │
//! │        │             ├── add_to_cart                                   │
//! │        │             ├── remove_from_cart                              │
//! │        │             └── delete_cart                                   │
//! │        │                                                                │
//! │        └──────────► ProductCatalog   products keyed by id              │
//! │                      └── get_product                                   │
//! │                                                                         │
//! │   tote-db implements both on SQLite; tests use in-memory fakes.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations report their own failures as [`CoreError::Storage`].
//!
//! [`CoreError::Storage`]: crate::error::CoreError::Storage

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{CartRow, Product};

/// Durable cart storage keyed by username.
///
/// No method validates its arguments; the accessor does that before
/// calling in.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Returns every row owned by `username`, in a stable order. Empty when
    /// the user has no cart.
    async fn get_cart(&self, username: &str) -> CoreResult<Vec<CartRow>>;

    /// Records one more occurrence of `product_id` in the user's cart.
    async fn add_to_cart(&self, username: &str, product_id: i64) -> CoreResult<()>;

    /// Drops one occurrence of `product_id` from the user's cart.
    async fn remove_from_cart(&self, username: &str, product_id: i64) -> CoreResult<()>;

    /// Deletes every row owned by `username`.
    async fn delete_cart(&self, username: &str) -> CoreResult<()>;
}

/// Product lookup by id.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns the product, or `None` if the catalog has no such id.
    async fn get_product(&self, product_id: i64) -> CoreResult<Option<Product>>;
}

#[async_trait]
impl<T: CartStore + ?Sized> CartStore for Arc<T> {
    async fn get_cart(&self, username: &str) -> CoreResult<Vec<CartRow>> {
        (**self).get_cart(username).await
    }

    async fn add_to_cart(&self, username: &str, product_id: i64) -> CoreResult<()> {
        (**self).add_to_cart(username, product_id).await
    }

    async fn remove_from_cart(&self, username: &str, product_id: i64) -> CoreResult<()> {
        (**self).remove_from_cart(username, product_id).await
    }

    async fn delete_cart(&self, username: &str) -> CoreResult<()> {
        (**self).delete_cart(username).await
    }
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn get_product(&self, product_id: i64) -> CoreResult<Option<Product>> {
        (**self).get_product(product_id).await
    }
}

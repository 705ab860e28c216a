//! # Domain Types
//!
//! Core domain types used throughout Tote.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartRow      │   │      Cart       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  sku            │   │  username       │   │  username       │       │
//! │  │  name           │   │  contents (txt) │   │  contents [..]  │       │
//! │  │  price_cents    │   │  cost_cents     │   │  cost (number)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │   catalog-owned         store-owned           ephemeral, assembled     │
//! │                                               on demand, never saved   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Number, Value};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product record owned by the catalog.
///
/// The accessor only ever looks products up by `id`; every other field is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Catalog identifier. Zero is never a valid id.
    pub id: i64,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name.
    pub name: String,

    pub description: Option<String>,

    /// Price in cents.
    pub price_cents: i64,

    /// Inactive products are invisible to the catalog lookup.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Cart Row
// =============================================================================

/// A raw cart row as the store keeps it.
///
/// `contents` is the text form of an integer list (`"[1, 2, 3]"`). A user
/// may own several rows; readers concatenate them in `id` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CartRow {
    pub id: i64,
    pub username: String,
    pub contents: String,
    pub cost_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartRow {
    /// Returns the stored cost as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A user's cart, assembled from stored rows and resolved products.
///
/// ## Invariants
/// None beyond the field types. `cost` is whatever number the source said it
/// was, integer or not; it is not recomputed from `contents`. Carts built by
/// the accessor carry integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: i64,
    pub username: String,
    pub contents: Vec<Product>,
    pub cost: Number,
}

impl Cart {
    /// Creates a cart from its parts.
    pub fn new(
        id: i64,
        username: impl Into<String>,
        contents: Vec<Product>,
        cost: impl Into<Number>,
    ) -> Self {
        Cart {
            id,
            username: username.into(),
            contents,
            cost: cost.into(),
        }
    }

    /// Creates a cart whose cost is the sum of its products' prices.
    pub fn from_products(id: i64, username: impl Into<String>, contents: Vec<Product>) -> Self {
        let cost: Money = contents.iter().map(Product::price).sum();
        Cart::new(id, username, contents, cost)
    }

    /// Reconstitutes a cart from a raw mapping.
    ///
    /// ## Required Keys
    /// `id`, `username`, `contents`, `cost`. Extra keys are ignored.
    ///
    /// ## Errors
    /// [`CoreError::MalformedCart`] if a key is missing, a value has the
    /// wrong shape, or `data` is not an object. This is the one hard
    /// failure in the crate: a bad mapping is the caller's bug, not dirty
    /// data from storage.
    ///
    /// ## Example
    /// ```rust
    /// use serde_json::json;
    /// use tote_core::Cart;
    ///
    /// let cart = Cart::load(json!({
    ///     "id": 1, "username": "bob", "contents": [], "cost": 0
    /// })).unwrap();
    /// assert_eq!(cart.username, "bob");
    ///
    /// assert!(Cart::load(json!({ "id": 1, "username": "bob" })).is_err());
    /// ```
    pub fn load(data: Value) -> CoreResult<Self> {
        serde_json::from_value(data).map_err(|e| CoreError::MalformedCart {
            reason: e.to_string(),
        })
    }

    /// Projects the cart back into a raw mapping. Inverse of [`Cart::load`].
    pub fn to_dict(&self) -> Value {
        json!({
            "id": self.id,
            "username": self.username,
            "contents": self.contents,
            "cost": self.cost,
        })
    }

    /// The cost as [`Money`] when it is an integer count of cents.
    ///
    /// `None` for fractional or out-of-range costs from a loaded mapping.
    pub fn cost_in_cents(&self) -> Option<Money> {
        self.cost.as_i64().map(Money::from_cents)
    }

    /// Returns the number of products (duplicates counted).
    pub fn item_count(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

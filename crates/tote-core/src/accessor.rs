//! # Cart Accessor
//!
//! Reads a user's cart as product records and forwards cart mutations to
//! the store.
//!
//! ## Read Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_cart("bob")                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.get_cart("bob")                                                 │
//! │       │   row 1: "[1, 2]"    row 2: "[3, 1]"    row 3: "garbage"       │
//! │       │                                                                 │
//! │       ├── no rows? ──────────────────────────────► []                  │
//! │       ▼                                                                 │
//! │  parse_contents per row, flattened in row order                        │
//! │       │   [1, 2, 3, 1]          (row 3 decodes to [])                  │
//! │       ▼                                                                 │
//! │  get_cached_product per id, unknown ids dropped                        │
//! │       │   1 → A, 2 → None, 3 → C, 1 → A                                │
//! │       ▼                                                                 │
//! │  [A, C, A]                (order kept, duplicates kept)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutations
//! `add_to_cart`, `remove_from_cart` and `delete_cart` check their
//! arguments and then hand straight off to the store. A call with an empty
//! username or a zero product id does nothing and returns `Ok(())`.
//! Callers cannot tell a skipped call from an applied one.

use tracing::debug;

use crate::catalog::CachedCatalog;
use crate::contents::parse_contents;
use crate::error::CoreResult;
use crate::money::Money;
use crate::store::{CartStore, ProductCatalog};
use crate::types::{Cart, CartRow, Product};
use crate::validation::{validate_mutation, validate_username};

/// Façade over a cart store and a cached product catalog.
///
/// ## Usage
/// ```rust,ignore
/// let accessor = CartAccessor::new(db.carts(), db.products());
///
/// accessor.add_to_cart("bob", 7).await?;
/// let products = accessor.get_cart("bob").await?;
/// ```
#[derive(Debug)]
pub struct CartAccessor<S, C> {
    store: S,
    products: CachedCatalog<C>,
}

impl<S: CartStore, C: ProductCatalog> CartAccessor<S, C> {
    /// Creates an accessor with a default-sized product cache.
    pub fn new(store: S, catalog: C) -> Self {
        Self::with_cache(store, CachedCatalog::new(catalog))
    }

    /// Creates an accessor around an already configured product cache.
    pub fn with_cache(store: S, products: CachedCatalog<C>) -> Self {
        CartAccessor { store, products }
    }

    /// Returns the products in a user's cart.
    ///
    /// ## Fail-Soft Behavior
    /// - No rows for `username` → empty list
    /// - Row contents that do not decode → that row contributes nothing
    /// - Ids the catalog does not know → skipped
    ///
    /// Store and catalog failures still propagate.
    pub async fn get_cart(&self, username: &str) -> CoreResult<Vec<Product>> {
        let rows = self.store.get_cart(username).await?;
        if rows.is_empty() {
            debug!(username = %username, "No cart rows");
            return Ok(Vec::new());
        }

        self.resolve_rows(username, &rows).await
    }

    /// Assembles a [`Cart`] value for a user.
    ///
    /// `id` is the first row's id and `cost` is the sum of the rows' stored
    /// costs in cents, clamped at `i64::MAX`; contents resolve exactly as in
    /// [`CartAccessor::get_cart`].
    ///
    /// ## Returns
    /// * `Ok(None)` - The user has no cart rows
    pub async fn load_cart(&self, username: &str) -> CoreResult<Option<Cart>> {
        let rows = self.store.get_cart(username).await?;
        let Some(first) = rows.first() else {
            debug!(username = %username, "No cart rows");
            return Ok(None);
        };

        let contents = self.resolve_rows(username, &rows).await?;
        let cost: Money = rows.iter().map(CartRow::cost).sum();

        Ok(Some(Cart::new(first.id, username, contents, cost)))
    }

    /// Adds one occurrence of a product to the user's cart.
    ///
    /// Silent no-op when `username` is empty or `product_id` is zero. No
    /// existence check and no duplicate prevention.
    pub async fn add_to_cart(&self, username: &str, product_id: i64) -> CoreResult<()> {
        if let Err(reason) = validate_mutation(username, product_id) {
            debug!(username = %username, product_id, %reason, "Skipping add_to_cart");
            return Ok(());
        }

        self.store.add_to_cart(username, product_id).await
    }

    /// Removes one occurrence of a product from the user's cart.
    ///
    /// Silent no-op when `username` is empty or `product_id` is zero.
    pub async fn remove_from_cart(&self, username: &str, product_id: i64) -> CoreResult<()> {
        if let Err(reason) = validate_mutation(username, product_id) {
            debug!(username = %username, product_id, %reason, "Skipping remove_from_cart");
            return Ok(());
        }

        self.store.remove_from_cart(username, product_id).await
    }

    /// Deletes the user's whole cart. Silent no-op when `username` is empty.
    pub async fn delete_cart(&self, username: &str) -> CoreResult<()> {
        if let Err(reason) = validate_username(username) {
            debug!(%reason, "Skipping delete_cart");
            return Ok(());
        }

        self.store.delete_cart(username).await
    }

    /// The product cache, for statistics and manual invalidation.
    pub fn products(&self) -> &CachedCatalog<C> {
        &self.products
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn resolve_rows(&self, username: &str, rows: &[CartRow]) -> CoreResult<Vec<Product>> {
        let product_ids: Vec<i64> = rows
            .iter()
            .flat_map(|row| parse_contents(&row.contents))
            .collect();

        let mut products = Vec::with_capacity(product_ids.len());
        for product_id in product_ids {
            match self.products.get_cached_product(product_id).await? {
                Some(product) => products.push(product),
                None => debug!(username = %username, product_id, "Dropping unknown product"),
            }
        }

        debug!(
            username = %username,
            rows = rows.len(),
            count = products.len(),
            "Resolved cart"
        );
        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::testing::{test_product, test_row, FakeCatalog, FakeStore, StoreCall};
    use std::num::NonZeroUsize;

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    fn accessor(rows: Vec<CartRow>, products: Vec<Product>) -> CartAccessor<FakeStore, FakeCatalog> {
        CartAccessor::new(FakeStore::with_rows(rows), FakeCatalog::with_products(products))
    }

    // -------------------------------------------------------------------------
    // Read path
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_cart_without_rows_is_empty() {
        let accessor = accessor(vec![], vec![test_product(1, 100)]);

        assert!(accessor.get_cart("nouser").await.unwrap().is_empty());
        assert_eq!(accessor.products().stats().misses(), 0);
    }

    #[tokio::test]
    async fn test_get_cart_drops_unknown_products() {
        let accessor = accessor(
            vec![test_row(1, "bob", "[1,2]", 0)],
            vec![test_product(1, 100)],
        );

        let products = accessor.get_cart("bob").await.unwrap();
        assert_eq!(ids(&products), vec![1]);
        assert_eq!(products[0], test_product(1, 100));
    }

    #[tokio::test]
    async fn test_get_cart_concatenates_rows_in_order() {
        let accessor = accessor(
            vec![
                test_row(1, "bob", "[3, 1]", 0),
                test_row(2, "alice", "[2]", 0),
                test_row(3, "bob", "[2, 3]", 0),
            ],
            vec![test_product(1, 1), test_product(2, 2), test_product(3, 3)],
        );

        let products = accessor.get_cart("bob").await.unwrap();
        assert_eq!(ids(&products), vec![3, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_cart_keeps_duplicates() {
        let accessor = accessor(
            vec![test_row(1, "bob", "[1, 1, 1]", 0)],
            vec![test_product(1, 100)],
        );

        let products = accessor.get_cart("bob").await.unwrap();
        assert_eq!(ids(&products), vec![1, 1, 1]);
        assert_eq!(accessor.products().inner().lookups(1), 1);
    }

    #[tokio::test]
    async fn test_get_cart_skips_corrupt_rows() {
        let accessor = accessor(
            vec![
                test_row(1, "bob", "[1]", 0),
                test_row(2, "bob", "{not: a list}", 0),
                test_row(3, "bob", "", 0),
                test_row(4, "bob", "[2]", 0),
            ],
            vec![test_product(1, 1), test_product(2, 2)],
        );

        assert_eq!(ids(&accessor.get_cart("bob").await.unwrap()), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_get_cart_uses_cache_across_calls() {
        let accessor = accessor(
            vec![test_row(1, "bob", "[1, 2]", 0)],
            vec![test_product(1, 1)],
        );

        accessor.get_cart("bob").await.unwrap();
        accessor.get_cart("bob").await.unwrap();

        assert_eq!(accessor.products().inner().lookups(1), 1);
        assert_eq!(accessor.products().inner().lookups(2), 1);
    }

    #[tokio::test]
    async fn test_get_cart_serves_stale_cached_product() {
        let accessor = accessor(
            vec![test_row(1, "bob", "[1]", 0)],
            vec![test_product(1, 100)],
        );
        accessor.get_cart("bob").await.unwrap();

        accessor.products().inner().insert(test_product(1, 999));

        let products = accessor.get_cart("bob").await.unwrap();
        assert_eq!(products[0].price_cents, 100);
    }

    #[tokio::test]
    async fn test_get_cart_with_small_cache() {
        let store = FakeStore::with_rows(vec![test_row(1, "bob", "[1, 2, 1]", 0)]);
        let catalog = FakeCatalog::with_products(vec![test_product(1, 1), test_product(2, 2)]);
        let accessor = CartAccessor::with_cache(
            store,
            CachedCatalog::with_capacity(catalog, NonZeroUsize::new(1).unwrap()),
        );

        let products = accessor.get_cart("bob").await.unwrap();
        assert_eq!(ids(&products), vec![1, 2, 1]);
        // 2 evicted 1, so the second 1 went back to the catalog
        assert_eq!(accessor.products().inner().lookups(1), 2);
        assert_eq!(accessor.products().stats().evictions(), 2);
    }

    #[tokio::test]
    async fn test_get_cart_propagates_store_failure() {
        let accessor = accessor(vec![test_row(1, "bob", "[1]", 0)], vec![]);
        accessor.store().fail_next();

        let err = accessor.get_cart("bob").await.unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
    }

    #[tokio::test]
    async fn test_get_cart_propagates_catalog_failure() {
        let accessor = accessor(vec![test_row(1, "bob", "[1]", 0)], vec![test_product(1, 1)]);
        accessor.products().inner().fail_next();

        assert!(accessor.get_cart("bob").await.is_err());
        assert_eq!(ids(&accessor.get_cart("bob").await.unwrap()), vec![1]);
    }

    #[tokio::test]
    async fn test_load_cart_assembles_value() {
        let accessor = accessor(
            vec![
                test_row(4, "bob", "[1, 2]", 300),
                test_row(9, "bob", "[7]", 50),
            ],
            vec![test_product(1, 100), test_product(2, 200)],
        );

        let cart = accessor.load_cart("bob").await.unwrap().unwrap();
        assert_eq!(cart.id, 4);
        assert_eq!(cart.username, "bob");
        assert_eq!(ids(&cart.contents), vec![1, 2]);
        assert_eq!(cart.cost_in_cents(), Some(Money::from_cents(350)));

        assert!(accessor.load_cart("nouser").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_cart_clamps_cost_overflow() {
        let accessor = accessor(
            vec![
                test_row(1, "bob", "[]", i64::MAX),
                test_row(2, "bob", "[]", 1),
            ],
            vec![],
        );

        let cart = accessor.load_cart("bob").await.unwrap().unwrap();
        assert_eq!(cart.cost_in_cents(), Some(Money::from_cents(i64::MAX)));
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_to_cart_rejects_invalid_arguments_silently() {
        let accessor = accessor(vec![], vec![]);

        accessor.add_to_cart("", 5).await.unwrap();
        accessor.add_to_cart("bob", 0).await.unwrap();
        accessor.remove_from_cart("", 5).await.unwrap();
        accessor.remove_from_cart("bob", 0).await.unwrap();
        accessor.delete_cart("").await.unwrap();

        assert!(accessor.store().calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_to_cart_delegates_once() {
        let accessor = accessor(vec![], vec![]);

        accessor.add_to_cart("bob", 7).await.unwrap();

        assert_eq!(
            accessor.store().calls(),
            vec![StoreCall::Add("bob".to_string(), 7)]
        );
    }

    #[tokio::test]
    async fn test_add_same_product_twice_reads_twice() {
        let accessor = accessor(vec![], vec![test_product(7, 700)]);

        accessor.add_to_cart("bob", 7).await.unwrap();
        accessor.add_to_cart("bob", 7).await.unwrap();

        assert_eq!(ids(&accessor.get_cart("bob").await.unwrap()), vec![7, 7]);
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_forwarded() {
        let accessor = accessor(vec![], vec![]);

        accessor.add_to_cart("bob", 404).await.unwrap();

        assert_eq!(
            accessor.store().mutations(),
            vec![StoreCall::Add("bob".to_string(), 404)]
        );
        assert!(accessor.get_cart("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_delete_delegate() {
        let accessor = accessor(
            vec![test_row(1, "bob", "[1, 2]", 0)],
            vec![test_product(1, 1), test_product(2, 2)],
        );

        accessor.remove_from_cart("bob", 1).await.unwrap();
        assert_eq!(ids(&accessor.get_cart("bob").await.unwrap()), vec![2]);

        accessor.delete_cart("bob").await.unwrap();
        assert!(accessor.get_cart("bob").await.unwrap().is_empty());

        assert_eq!(
            accessor.store().mutations(),
            vec![
                StoreCall::Remove("bob".to_string(), 1),
                StoreCall::Delete("bob".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_mutation_store_failure_propagates() {
        let accessor = accessor(vec![], vec![]);
        accessor.store().fail_next();

        assert!(accessor.add_to_cart("bob", 1).await.is_err());
    }

    #[tokio::test]
    async fn test_negative_product_id_is_forwarded() {
        let accessor = accessor(vec![], vec![]);

        accessor.remove_from_cart("bob", -3).await.unwrap();

        assert_eq!(
            accessor.store().calls(),
            vec![StoreCall::Remove("bob".to_string(), -3)]
        );
    }
}

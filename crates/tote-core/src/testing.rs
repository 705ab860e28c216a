//! In-memory collaborators for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use crate::contents::{format_contents, parse_contents};
use crate::error::{CoreError, CoreResult};
use crate::store::{CartStore, ProductCatalog};
use crate::types::{CartRow, Product};

pub fn test_product(id: i64, price_cents: i64) -> Product {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    Product {
        id,
        sku: format!("SKU-{}", id),
        name: format!("Product {}", id),
        description: None,
        price_cents,
        is_active: true,
        created_at: at,
        updated_at: at,
    }
}

pub fn test_row(id: i64, username: &str, contents: &str, cost_cents: i64) -> CartRow {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    CartRow {
        id,
        username: username.to_string(),
        contents: contents.to_string(),
        cost_cents,
        created_at: at,
        updated_at: at,
    }
}

fn injected_failure() -> CoreError {
    CoreError::storage(std::io::Error::new(
        std::io::ErrorKind::Other,
        "injected failure",
    ))
}

// =============================================================================
// Fake Catalog
// =============================================================================

#[derive(Default)]
pub struct FakeCatalog {
    products: Mutex<HashMap<i64, Product>>,
    lookups: Mutex<HashMap<i64, usize>>,
    fail_next: AtomicBool,
}

impl FakeCatalog {
    pub fn with_products(products: Vec<Product>) -> Self {
        let catalog = FakeCatalog::default();
        for product in products {
            catalog.insert(product);
        }
        catalog
    }

    pub fn insert(&self, product: Product) {
        self.products.lock().insert(product.id, product);
    }

    /// How many times `get_product(id)` reached this catalog.
    pub fn lookups(&self, id: i64) -> usize {
        self.lookups.lock().get(&id).copied().unwrap_or(0)
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductCatalog for FakeCatalog {
    async fn get_product(&self, product_id: i64) -> CoreResult<Option<Product>> {
        *self.lookups.lock().entry(product_id).or_insert(0) += 1;
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(injected_failure());
        }
        Ok(self.products.lock().get(&product_id).cloned())
    }
}

// =============================================================================
// Fake Store
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get(String),
    Add(String, i64),
    Remove(String, i64),
    Delete(String),
}

#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<CartRow>>,
    calls: Mutex<Vec<StoreCall>>,
    fail_next: AtomicBool,
}

impl FakeStore {
    pub fn with_rows(rows: Vec<CartRow>) -> Self {
        FakeStore {
            rows: Mutex::new(rows),
            ..FakeStore::default()
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    /// Calls other than reads.
    pub fn mutations(&self) -> Vec<StoreCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, StoreCall::Get(_)))
            .collect()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: StoreCall) -> CoreResult<()> {
        self.calls.lock().push(call);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(injected_failure());
        }
        Ok(())
    }
}

#[async_trait]
impl CartStore for FakeStore {
    async fn get_cart(&self, username: &str) -> CoreResult<Vec<CartRow>> {
        self.record(StoreCall::Get(username.to_string()))?;
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|r| r.username == username)
            .cloned()
            .collect())
    }

    async fn add_to_cart(&self, username: &str, product_id: i64) -> CoreResult<()> {
        self.record(StoreCall::Add(username.to_string(), product_id))?;

        let mut rows = self.rows.lock();
        match rows.iter_mut().rev().find(|r| r.username == username) {
            Some(row) => {
                let mut ids = parse_contents(&row.contents);
                ids.push(product_id);
                row.contents = format_contents(&ids);
            }
            None => {
                let id = rows.len() as i64 + 1;
                rows.push(test_row(id, username, &format_contents(&[product_id]), 0));
            }
        }
        Ok(())
    }

    async fn remove_from_cart(&self, username: &str, product_id: i64) -> CoreResult<()> {
        self.record(StoreCall::Remove(username.to_string(), product_id))?;

        let mut rows = self.rows.lock();
        for row in rows.iter_mut().filter(|r| r.username == username) {
            let mut ids = parse_contents(&row.contents);
            if let Some(pos) = ids.iter().position(|&id| id == product_id) {
                ids.remove(pos);
                row.contents = format_contents(&ids);
                break;
            }
        }
        Ok(())
    }

    async fn delete_cart(&self, username: &str) -> CoreResult<()> {
        self.record(StoreCall::Delete(username.to_string()))?;
        self.rows.lock().retain(|r| r.username != username);
        Ok(())
    }
}

//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - Lookup by id (the `ProductCatalog` seam the accessor resolves through)
//! - Lookup by SKU
//! - Insert (seeding, fixtures)
//!
//! Inactive products are invisible to lookups: a cart that still holds the
//! id of a retired product resolves it as absent.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tote_core::{CoreResult, Product, ProductCatalog};

/// Columns selected for every `Product` read, in `FromRow` order.
const PRODUCT_COLUMNS: &str = r#"
    id,
    sku,
    name,
    description,
    price_cents,
    is_active,
    created_at,
    updated_at
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.get_by_id(42).await?;
/// let by_sku = repo.get_by_sku("BEV-COC-001").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets an active product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found and active
    /// * `Ok(None)` - No such product, or it has been deactivated
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE id = ?1 AND is_active = 1",
            PRODUCT_COLUMNS
        );

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        debug!(id = id, found = product.is_some(), "Product lookup");
        Ok(product)
    }

    /// Gets an active product by SKU.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE sku = ?1 AND is_active = 1",
            PRODUCT_COLUMNS
        );

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// The caller chooses the id; `created_at`/`updated_at` are stamped here.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - id or SKU already taken
    /// * `DbError::CheckViolation` - negative price
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = product.id, sku = %product.sku, "Inserting product");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO products (
                id, sku, name, description, price_cents,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            "#,
        )
        .bind(product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.is_active)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &product.sku),
            other => other,
        })?;

        Ok(Product {
            created_at: now,
            updated_at: now,
            ..product.clone()
        })
    }

    /// Marks a product inactive. Carts holding its id keep it, but lookups
    /// stop resolving it.
    pub async fn deactivate(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deactivating product");

        let result = sqlx::query("UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ProductCatalog for ProductRepository {
    async fn get_product(&self, product_id: i64) -> CoreResult<Option<Product>> {
        Ok(self.get_by_id(product_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn sample_product(id: i64, sku: &str, price_cents: i64) -> Product {
        let now = Utc::now();
        Product {
            id,
            sku: sku.to_string(),
            name: format!("Product {}", id),
            description: None,
            price_cents,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    #[tokio::test]
    async fn test_insert_and_get_by_id() {
        let repo = repo().await;
        repo.insert(&sample_product(7, "BEV-COC-007", 199)).await.unwrap();

        let found = repo.get_by_id(7).await.unwrap().unwrap();
        assert_eq!(found.sku, "BEV-COC-007");
        assert_eq!(found.price_cents, 199);
        assert!(found.is_active);

        assert!(repo.get_by_id(8).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_sku() {
        let repo = repo().await;
        repo.insert(&sample_product(1, "SNK-LAY-001", 349)).await.unwrap();

        assert_eq!(repo.get_by_sku("SNK-LAY-001").await.unwrap().unwrap().id, 1);
        assert!(repo.get_by_sku("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_sku_is_rejected() {
        let repo = repo().await;
        repo.insert(&sample_product(1, "DUP", 100)).await.unwrap();

        let err = repo.insert(&sample_product(2, "DUP", 100)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let repo = repo().await;

        let err = repo.insert(&sample_product(4, "NEG", -1)).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { ref constraint } if constraint.contains("price_cents")));
        assert!(repo.get_by_id(4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deactivated_products_are_not_found() {
        let repo = repo().await;
        repo.insert(&sample_product(3, "GRO-RIC-003", 500)).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.deactivate(3).await.unwrap();

        assert!(repo.get_product(3).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(
            repo.deactivate(99).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_catalog_trait_lookup() {
        let repo = repo().await;
        repo.insert(&sample_product(5, "FRZ-PIZ-005", 899)).await.unwrap();

        let product = repo.get_product(5).await.unwrap().unwrap();
        assert_eq!(product.price().cents(), 899);
        assert!(repo.get_product(6).await.unwrap().is_none());
    }
}

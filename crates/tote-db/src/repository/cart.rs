//! # Cart Repository
//!
//! Stores carts as rows of `(username, contents, cost_cents)`. A user may own
//! several rows; readers walk them in `id` order and concatenate.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart("alice", 7)                                               │
//! │       │                                                                 │
//! │       ▼  BEGIN                                                          │
//! │  newest row for alice ──► none / corrupt ──► INSERT "[7]", price(7)    │
//! │       │                                                                 │
//! │       ▼ "[1, 2]"                                                        │
//! │  UPDATE contents = "[1, 2, 7]", cost_cents += price(7)                 │
//! │       │                                                                 │
//! │       ▼  COMMIT                                                         │
//! │                                                                         │
//! │  remove_from_cart("alice", 2)                                          │
//! │       │                                                                 │
//! │       ▼  BEGIN                                                          │
//! │  first row (by id) whose contents hold 2 ──► none ──► no-op            │
//! │       │                                                                 │
//! │       ▼ "[1, 2, 7]"                                                     │
//! │  UPDATE contents = "[1, 7]", cost_cents -= price(2)                    │
//! │       │                                                                 │
//! │       ▼  COMMIT                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `price(id)` is the active catalog price, or 0 for an unknown product.
//! Rows whose contents don't decode are never rewritten.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use tote_core::{format_contents, try_parse_contents, CartRow, CartStore, CoreResult};

/// Repository for cart rows.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Lists every row for `username`, oldest first.
    pub async fn rows_for(&self, username: &str) -> DbResult<Vec<CartRow>> {
        let rows = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT id, username, contents, cost_cents, created_at, updated_at
            FROM carts
            WHERE username = ?1
            ORDER BY id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        debug!(username = %username, rows = rows.len(), "Fetched cart rows");
        Ok(rows)
    }

    /// Appends `product_id` to the user's newest row.
    pub async fn append(&self, username: &str, product_id: i64) -> DbResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let price = price_of(&mut tx, product_id).await?;
        let now = Utc::now();

        let newest = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, contents FROM carts WHERE username = ?1 ORDER BY id DESC LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&mut *tx)
        .await?;

        match newest.and_then(|(id, contents)| try_parse_contents(&contents).map(|ids| (id, ids))) {
            Some((row_id, mut ids)) => {
                ids.push(product_id);

                sqlx::query(
                    r#"
                    UPDATE carts
                    SET contents = ?2, cost_cents = cost_cents + ?3, updated_at = ?4
                    WHERE id = ?1
                    "#,
                )
                .bind(row_id)
                .bind(format_contents(&ids))
                .bind(price)
                .bind(now)
                .execute(&mut *tx)
                .await?;

                debug!(username = %username, product_id, row_id, "Appended to cart row");
            }
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO carts (username, contents, cost_cents, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, ?4)
                    "#,
                )
                .bind(username)
                .bind(format_contents(&[product_id]))
                .bind(price)
                .bind(now)
                .execute(&mut *tx)
                .await?;

                debug!(
                    username = %username,
                    product_id,
                    row_id = result.last_insert_rowid(),
                    "Started new cart row"
                );
            }
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }

    /// Removes the first occurrence of `product_id` from the user's rows.
    ///
    /// ## Returns
    /// * `Ok(true)` - An occurrence was removed
    /// * `Ok(false)` - No decodable row held the id
    pub async fn remove_first(&self, username: &str, product_id: i64) -> DbResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let rows = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, contents FROM carts WHERE username = ?1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(&mut *tx)
        .await?;

        let hit = rows.into_iter().find_map(|(row_id, contents)| {
            let mut ids = try_parse_contents(&contents)?;
            let pos = ids.iter().position(|&id| id == product_id)?;
            ids.remove(pos);
            Some((row_id, ids))
        });

        let Some((row_id, ids)) = hit else {
            debug!(username = %username, product_id, "Product not in cart, nothing removed");
            return Ok(false);
        };

        let price = price_of(&mut tx, product_id).await?;

        sqlx::query(
            r#"
            UPDATE carts
            SET contents = ?2, cost_cents = MAX(cost_cents - ?3, 0), updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(row_id)
        .bind(format_contents(&ids))
        .bind(price)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(username = %username, product_id, row_id, "Removed from cart row");
        Ok(true)
    }

    /// Deletes every row for `username`, returning how many went.
    pub async fn delete_all(&self, username: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM carts WHERE username = ?1")
            .bind(username)
            .execute(&self.pool)
            .await?;

        debug!(username = %username, rows = result.rows_affected(), "Deleted cart");
        Ok(result.rows_affected())
    }
}

/// Active catalog price for `product_id`, 0 when unknown.
async fn price_of(conn: &mut SqliteConnection, product_id: i64) -> DbResult<i64> {
    let price: Option<i64> =
        sqlx::query_scalar("SELECT price_cents FROM products WHERE id = ?1 AND is_active = 1")
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(price.unwrap_or(0))
}

#[async_trait]
impl CartStore for CartRepository {
    async fn get_cart(&self, username: &str) -> CoreResult<Vec<CartRow>> {
        Ok(self.rows_for(username).await?)
    }

    async fn add_to_cart(&self, username: &str, product_id: i64) -> CoreResult<()> {
        Ok(self.append(username, product_id).await?)
    }

    async fn remove_from_cart(&self, username: &str, product_id: i64) -> CoreResult<()> {
        self.remove_first(username, product_id).await?;
        Ok(())
    }

    async fn delete_cart(&self, username: &str) -> CoreResult<()> {
        self.delete_all(username).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

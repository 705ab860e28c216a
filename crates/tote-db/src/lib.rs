//! # tote-db: Database Layer for Tote
//!
//! SQLite-backed implementations of the `CartStore` and `ProductCatalog`
//! traits from `tote-core`, plus pool setup and embedded migrations.
//!
//! ## Schema
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  products                         carts                                 │
//! │  ┌──────────────┐                 ┌──────────────┐                      │
//! │  │ id (PK)      │◄── ids held in  │ id (PK)      │                      │
//! │  │ sku (UNIQUE) │    contents ────│ username     │  (many rows per user)│
//! │  │ name         │                 │ contents     │  "[1, 2, 3]"         │
//! │  │ price_cents  │                 │ cost_cents   │                      │
//! │  │ is_active    │                 │ ...          │                      │
//! │  └──────────────┘                 └──────────────┘                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use tote_core::CartAccessor;
//! use tote_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./tote.db")).await?;
//! let accessor = CartAccessor::new(db.carts(), db.products());
//! accessor.add_to_cart("alice", 7).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DbLocation};
pub use repository::{CartRepository, ProductRepository};
pub use seed::seed_products;

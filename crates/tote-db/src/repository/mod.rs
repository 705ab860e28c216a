//! # Repository Module
//!
//! SQLite implementations of the collaborator traits from `tote-core`.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartAccessor (tote-core)                                              │
//! │       │                                                                 │
//! │       │  store.get_cart("alice")      catalog.get_product(7)           │
//! │       ▼                               ▼                                 │
//! │  CartRepository                   ProductRepository                    │
//! │  ├── get_cart                     ├── get_product (active only)        │
//! │  ├── add_to_cart                  ├── get_by_sku                       │
//! │  ├── remove_from_cart             ├── insert                           │
//! │  └── delete_cart                  └── count                            │
//! │       │                               │                                 │
//! │       └──────────────┬────────────────┘                                 │
//! │                      ▼                                                  │
//! │               SQLite Database                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CartRepository`] - Cart rows, implements `CartStore`
//! - [`ProductRepository`] - Product catalog, implements `ProductCatalog`

pub mod cart;
pub mod product;

pub use cart::CartRepository;
pub use product::ProductRepository;

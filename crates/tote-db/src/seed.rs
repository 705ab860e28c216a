//! # Demo Catalog Seeding
//!
//! Populates an empty database with products so carts have something to
//! resolve against during development.
//!
//! ## Generated Products
//! Products are drawn from five categories, each name in several sizes:
//! - Beverages, Snacks, Dairy, Frozen, Grocery
//!
//! Each product has:
//! - Sequential id starting at 1
//! - Unique SKU: `{CATEGORY}-{NAME}-{ID}`
//! - Deterministic price: $1.99 - $9.99 plus a size addon

use chrono::Utc;
use tracing::{info, warn};

use crate::error::DbResult;
use crate::pool::Database;
use tote_core::Product;

/// Product categories for demo data.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "BEV",
        &[
            "Coca-Cola",
            "Sprite",
            "Red Bull",
            "Orange Juice",
            "Iced Tea",
            "Lemonade",
        ],
    ),
    (
        "SNK",
        &["Lays Classic", "Pretzels", "Kit Kat", "Oreos", "Goldfish"],
    ),
    (
        "DRY",
        &["Whole Milk", "Oat Milk", "Cheddar Cheese", "Greek Yogurt", "Butter"],
    ),
    (
        "FRZ",
        &["Vanilla Ice Cream", "Frozen Pizza", "Fish Sticks", "Sorbet"],
    ),
    (
        "GRO",
        &["Pasta Penne", "Rice Brown", "Peanut Butter", "Honey", "Oatmeal"],
    ),
];

/// Size variants and their price addon in cents.
const SIZES: &[(&str, i64)] = &[("Small", 0), ("Medium", 100), ("Large", 200), ("Family", 350)];

/// Inserts up to `count` demo products.
///
/// Seeding is skipped when the catalog already holds products, so running it
/// twice doesn't collide on ids.
///
/// ## Returns
/// Number of products inserted.
pub async fn seed_products(db: &Database, count: usize) -> DbResult<usize> {
    let products = db.products();

    let existing = products.count().await?;
    if existing > 0 {
        warn!(existing, "Catalog already populated, skipping seed");
        return Ok(0);
    }

    let start = std::time::Instant::now();
    let mut inserted = 0;

    for product in demo_catalog().take(count) {
        products.insert(&product).await?;
        inserted += 1;
    }

    info!(
        inserted,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Seeded demo products"
    );
    Ok(inserted)
}

/// Every name in every size, then repeated with a batch suffix, forever.
fn demo_catalog() -> impl Iterator<Item = Product> {
    let variants: Vec<(&'static str, &'static str, &'static str, i64)> = CATEGORIES
        .iter()
        .flat_map(|(category, names)| {
            names.iter().flat_map(move |name| {
                SIZES
                    .iter()
                    .map(move |(size, addon)| (*category, *name, *size, *addon))
            })
        })
        .collect();
    let per_batch = variants.len();

    (1..).map(move |id: i64| {
        let index = (id as usize - 1) % per_batch;
        let batch = (id as usize - 1) / per_batch;
        let (category, name, size, addon) = variants[index];
        generate_product(id, category, name, size, addon, batch)
    })
}

/// Generates a single product with realistic data.
fn generate_product(
    id: i64,
    category: &str,
    name: &str,
    size: &str,
    price_addon: i64,
    batch: usize,
) -> Product {
    let now = Utc::now();

    let code: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    let sku = format!("{}-{}-{:04}", category, code, id);

    let base_price = 199 + (id * 17) % 800;

    let full_name = if batch == 0 {
        format!("{} {}", name, size)
    } else {
        format!("{} {} #{}", name, size, batch + 1)
    };

    Product {
        id,
        sku,
        name: full_name,
        description: None,
        price_cents: base_price + price_addon,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

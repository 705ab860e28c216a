//! Subcommand handlers.
//!
//! Handlers write to any `io::Write` so tests can capture what a user would
//! see on stdout.

use std::io::Write;
use tracing::debug;

use tote_core::{CachedCatalog, CartAccessor};
use tote_db::{seed_products, CartRepository, Database, ProductRepository};

use crate::cli::Command;
use crate::config::ToteConfig;
use crate::error::CliResult;

type Accessor = CartAccessor<CartRepository, ProductRepository>;

/// Builds the accessor the cart subcommands share.
pub fn accessor(db: &Database, config: &ToteConfig) -> CliResult<Accessor> {
    let products = CachedCatalog::with_capacity(db.products(), config.product_capacity()?);
    Ok(CartAccessor::with_cache(db.carts(), products))
}

/// Runs one subcommand against an open database.
pub async fn run(
    command: Command,
    db: &Database,
    config: &ToteConfig,
    out: &mut impl Write,
) -> CliResult<()> {
    match command {
        Command::Show { username } => show(&accessor(db, config)?, &username, out).await,
        Command::Add {
            username,
            product_id,
        } => {
            accessor(db, config)?
                .add_to_cart(&username, product_id)
                .await?;
            writeln!(out, "Added product {} to {}'s cart", product_id, username)?;
            Ok(())
        }
        Command::Remove {
            username,
            product_id,
        } => {
            accessor(db, config)?
                .remove_from_cart(&username, product_id)
                .await?;
            writeln!(out, "Removed product {} from {}'s cart", product_id, username)?;
            Ok(())
        }
        Command::Delete { username } => {
            accessor(db, config)?.delete_cart(&username).await?;
            writeln!(out, "Deleted {}'s cart", username)?;
            Ok(())
        }
        Command::Seed { count } => {
            let inserted = seed_products(db, count).await?;
            if inserted == 0 {
                writeln!(out, "Catalog already has products, nothing seeded")?;
            } else {
                writeln!(out, "Seeded {} products", inserted)?;
            }
            Ok(())
        }
    }
}

/// Prints resolved products, then the stored cost.
async fn show(accessor: &Accessor, username: &str, out: &mut impl Write) -> CliResult<()> {
    let Some(cart) = accessor.load_cart(username).await? else {
        writeln!(out, "{}'s cart is empty", username)?;
        return Ok(());
    };

    writeln!(out, "Cart #{} for {} ({} items)", cart.id, cart.username, cart.item_count())?;
    for product in &cart.contents {
        writeln!(
            out,
            "  {:>5}  {:<14} {:<28} {:>9}",
            product.id,
            product.sku,
            product.name,
            product.price().to_string()
        )?;
    }
    match cart.cost_in_cents() {
        Some(cost) => writeln!(out, "Total: {}", cost)?,
        None => writeln!(out, "Total: {}", cart.cost)?,
    }

    let stats = accessor.products().stats();
    debug!(
        hits = stats.hits(),
        misses = stats.misses(),
        hit_ratio = stats.hit_ratio(),
        "Product cache"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tote_db::DbConfig;

    async fn run_to_string(command: Command, db: &Database) -> String {
        let mut out = Vec::new();
        run(command, db, &ToteConfig::default(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_seed_add_show_remove_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let out = run_to_string(Command::Seed { count: 5 }, &db).await;
        assert_eq!(out, "Seeded 5 products\n");

        let out = run_to_string(Command::Show { username: "alice".into() }, &db).await;
        assert_eq!(out, "alice's cart is empty\n");

        for id in [1, 2, 1] {
            run_to_string(
                Command::Add {
                    username: "alice".into(),
                    product_id: id,
                },
                &db,
            )
            .await;
        }

        let out = run_to_string(Command::Show { username: "alice".into() }, &db).await;
        assert!(out.starts_with("Cart #1 for alice (3 items)\n"));
        assert_eq!(out.lines().count(), 5);

        let p1 = db.products().get_by_id(1).await.unwrap().unwrap();
        let p2 = db.products().get_by_id(2).await.unwrap().unwrap();
        let total = p1.price() + p1.price() + p2.price();
        assert!(out.ends_with(&format!("Total: {}\n", total)));

        run_to_string(
            Command::Remove {
                username: "alice".into(),
                product_id: 1,
            },
            &db,
        )
        .await;
        let out = run_to_string(Command::Show { username: "alice".into() }, &db).await;
        assert!(out.starts_with("Cart #1 for alice (2 items)\n"));

        let out = run_to_string(Command::Delete { username: "alice".into() }, &db).await;
        assert_eq!(out, "Deleted alice's cart\n");
        let out = run_to_string(Command::Show { username: "alice".into() }, &db).await;
        assert_eq!(out, "alice's cart is empty\n");
    }

    #[tokio::test]
    async fn test_seed_twice_reports_nothing_seeded() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        run_to_string(Command::Seed { count: 3 }, &db).await;

        let out = run_to_string(Command::Seed { count: 3 }, &db).await;
        assert_eq!(out, "Catalog already has products, nothing seeded\n");
    }
}

//! Command-line surface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tote - inspect and edit shopping carts stored in SQLite
#[derive(Debug, Parser)]
#[command(name = "tote")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to tote.toml in the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the products in a user's cart and its cost
    Show { username: String },

    /// Add a product to a user's cart
    Add {
        username: String,
        #[arg(allow_negative_numbers = true)]
        product_id: i64,
    },

    /// Remove one occurrence of a product from a user's cart
    Remove {
        username: String,
        #[arg(allow_negative_numbers = true)]
        product_id: i64,
    },

    /// Delete every row of a user's cart
    Delete { username: String },

    /// Fill an empty catalog with demo products
    Seed {
        #[arg(long, short, default_value_t = 50)]
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["tote", "add", "alice", "7"]);
        assert!(matches!(
            cli.command,
            Command::Add { ref username, product_id: 7 } if username == "alice"
        ));

        let cli = Cli::parse_from(["tote", "--config", "t.toml", "seed"]);
        assert_eq!(cli.config, Some(PathBuf::from("t.toml")));
        assert!(matches!(cli.command, Command::Seed { count: 50 }));

        let cli = Cli::parse_from(["tote", "remove", "bob", "-3"]);
        assert!(matches!(cli.command, Command::Remove { product_id: -3, .. }));
    }

    #[test]
    fn test_rejects_non_numeric_product_id() {
        assert!(Cli::try_parse_from(["tote", "add", "alice", "seven"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

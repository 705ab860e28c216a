//! # tote
//!
//! Command-line front end for Tote carts.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Initialize Logging                                                 │
//! │     • tracing-subscriber with env filter                               │
//! │     • Default: info,tote=debug,sqlx=warn; override with RUST_LOG       │
//! │                                                                         │
//! │  2. Load Config                                                        │
//! │     • defaults → tote.toml → TOTE_* environment                        │
//! │                                                                         │
//! │  3. Open Database                                                      │
//! │     • create parent directory, connect pool, run migrations            │
//! │                                                                         │
//! │  4. Run Subcommand                                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tote_db::{Database, DbConfig};

use crate::cli::Cli;
use crate::config::ToteConfig;
use crate::error::CliResult;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = ToteConfig::load(cli.config)?;

    if let Some(parent) = config.database.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_config =
        DbConfig::new(&config.database.path).max_connections(config.database.max_connections);
    let db = Database::new(db_config).await?;
    info!(path = %config.database.path.display(), "Database ready");

    let mut stdout = std::io::stdout().lock();
    let result = commands::run(cli.command, &db, &config, &mut stdout).await;

    db.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tote=trace` - Show trace for tote crates only
/// - Default: `info,tote=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tote=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

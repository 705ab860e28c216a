//! CLI error type. Every failure `main` can report ends up here.

use std::path::PathBuf;
use thiserror::Error;
use tote_core::CoreError;
use tote_db::DbError;

#[derive(Debug, Error)]
pub enum CliError {
    /// Config file exists but couldn't be read.
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file isn't valid TOML for `ToteConfig`.
    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Values that parse but can't be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TOTE_DB_PATH=/tmp/tote.db                                          │
//! │     TOTE_DB_MAX_CONNECTIONS=4                                          │
//! │     TOTE_CACHE_CAPACITY=500                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or the platform config dir:                      │
//! │     ~/.config/tote/tote.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.tote.tote/tote.toml (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "tote.db"
//! max_connections = 5
//!
//! [cache]
//! product_capacity = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Database Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Defaults to `tote.db` in the platform data directory.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> PathBuf {
    directories::ProjectDirs::from("com", "tote", "tote")
        .map(|dirs| dirs.data_dir().join("tote.db"))
        .unwrap_or_else(|| PathBuf::from("tote.db"))
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

// =============================================================================
// Cache Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Number of product lookups the accessor memoizes.
    #[serde(default = "default_product_capacity")]
    pub product_capacity: usize,
}

fn default_product_capacity() -> usize {
    tote_core::DEFAULT_PRODUCT_CACHE_CAPACITY.get()
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            product_capacity: default_product_capacity(),
        }
    }
}

// =============================================================================
// ToteConfig
// =============================================================================

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToteConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub cache: CacheSettings,
}

impl ToteConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`tote.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that doesn't exist is an error; a missing
    /// file at the platform default location is not.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");

        let contents = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.database.max_connections == 0 {
            return Err(CliError::InvalidConfig(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if self.cache.product_capacity == 0 {
            return Err(CliError::InvalidConfig(
                "cache.product_capacity must be greater than 0".into(),
            ));
        }

        if self.database.path.as_os_str().is_empty() {
            return Err(CliError::InvalidConfig("database.path must not be empty".into()));
        }

        Ok(())
    }

    /// Cache capacity as the type `CachedCatalog` takes.
    pub fn product_capacity(&self) -> CliResult<NonZeroUsize> {
        NonZeroUsize::new(self.cache.product_capacity).ok_or_else(|| {
            CliError::InvalidConfig("cache.product_capacity must be greater than 0".into())
        })
    }

    /// Applies environment variable overrides read through `var`.
    ///
    /// Unparseable numbers are ignored with a warning.
    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("TOTE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = var("TOTE_DB_MAX_CONNECTIONS") {
            match max.parse::<u32>() {
                Ok(n) => self.database.max_connections = n,
                Err(_) => warn!(value = %max, "Ignoring non-numeric TOTE_DB_MAX_CONNECTIONS"),
            }
        }

        if let Some(capacity) = var("TOTE_CACHE_CAPACITY") {
            match capacity.parse::<usize>() {
                Ok(n) => self.cache.product_capacity = n,
                Err(_) => warn!(value = %capacity, "Ignoring non-numeric TOTE_CACHE_CAPACITY"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tote", "tote")
            .map(|dirs| dirs.config_dir().join("tote.toml"))
    }
}

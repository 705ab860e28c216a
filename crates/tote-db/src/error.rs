//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← categorized by sqlx's ErrorKind               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError::Storage ← What CartStore / ProductCatalog callers see      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::error::ErrorKind;
use thiserror::Error;
use tote_core::CoreError;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a product with an existing id or SKU
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A `CHECK` constraint rejected the row (e.g. a negative price).
    #[error("Constraint violated: {constraint}")]
    CheckViolation { constraint: String },

    /// The pool could not be built or is already closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Any other statement failure reported by SQLite.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Begin or commit failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Text after the `"... constraint failed: "` prefix SQLite puts on
/// constraint messages, e.g. `products.sku` or `price_cents >= 0`.
fn constraint_detail(message: &str) -> String {
    message
        .split_once("constraint failed: ")
        .map(|(_, detail)| detail)
        .unwrap_or(message)
        .to_string()
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// RowNotFound                      → DbError::NotFound
/// Database, kind UniqueViolation   → DbError::UniqueViolation (column from message)
/// Database, kind CheckViolation    → DbError::CheckViolation
/// Database, anything else          → DbError::QueryFailed
/// PoolTimedOut                     → DbError::PoolExhausted
/// PoolClosed                       → DbError::ConnectionFailed
/// Other                            → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let message = db_err.message();
                match db_err.kind() {
                    ErrorKind::UniqueViolation => {
                        DbError::duplicate(constraint_detail(message), "unknown")
                    }
                    ErrorKind::CheckViolation => DbError::CheckViolation {
                        constraint: constraint_detail(message),
                    },
                    _ => DbError::QueryFailed(message.to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        CoreError::storage(err)
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

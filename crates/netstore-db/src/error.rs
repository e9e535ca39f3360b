//! # Store Errors
//!
//! Everything a repository call can fail with.
//!
//! ## Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Errors Come From                               │
//! │                                                                         │
//! │  caller input ──► ValidationError ──► InvalidArgument   (before I/O)   │
//! │  field codec  ──► MappingError    ──► Mapping                           │
//! │  sqlx         ──► sqlx::Error     ──► UniqueViolation / QueryFailed /  │
//! │                                       PoolExhausted / ConnectionFailed │
//! │  startup      ──► prepare / migrate ► SchemaMismatch / MigrationFailed │
//! │                                                                         │
//! │  REST layer (external):                                                │
//! │    is_invalid_argument() → 400     is_not_found() → 404                │
//! │    anything else          → 500                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing row is never an error: lookups return `Option`/empty lists.
//! `NotFound` is reserved for operations whose *input* names something that
//! must exist (e.g. a variant id to clone).

use netstore_core::{MappingError, ValidationError};
use thiserror::Error;

/// Failure of a store operation.
#[derive(Debug, Error)]
pub enum DbError {
    /// An input names something the store does not hold.
    ///
    /// Raised by `clone_network` for a variant id missing from the source.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A write collided with a primary key or unique index.
    ///
    /// ## Typical causes
    /// - Creating a resource whose `(networkUuid, variantNum, id)` exists
    /// - Cloning into a variant number that is already populated
    /// - Reusing a variant id within one network
    #[error("Constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// The pool could not open or reach the database file.
    #[error("Cannot connect to database: {0}")]
    ConnectionFailed(String),

    /// An embedded migration was rejected.
    #[error("Schema migration failed: {0}")]
    MigrationFailed(String),

    /// A statement could not be prepared at startup.
    ///
    /// ## Typical causes
    /// - Migrations disabled and the schema was never provisioned
    /// - The schema lacks a column the mapping registry declares
    ///
    /// The store refuses to start.
    #[error("Schema mismatch on table {table} ({operation}): {message}")]
    SchemaMismatch {
        table: String,
        operation: String,
        message: String,
    },

    /// The backend rejected a statement at run time.
    #[error("Statement failed: {0}")]
    QueryFailed(String),

    /// No pooled connection became free before the acquire timeout.
    #[error("Timed out waiting for a pooled connection")]
    PoolExhausted,

    /// Caller argument rejected before any backend call.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Field ⇄ column conversion failed.
    #[error("Mapping failed: {0}")]
    Mapping(#[from] MappingError),

    /// Anything else, including a statement shape the table does not have.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Whether the caller supplied a bad argument (maps to a 4xx response).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DbError::InvalidArgument(_))
    }

    /// Whether the caller referenced something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

/// SQLite reports key collisions as `UNIQUE constraint failed: t.a, t.b`.
const UNIQUE_FAILED: &str = "UNIQUE constraint failed: ";

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message();
                match message.split_once(UNIQUE_FAILED) {
                    Some((_, columns)) => DbError::UniqueViolation {
                        constraint: columns.to_string(),
                    },
                    None => DbError::QueryFailed(message.to_string()),
                }
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

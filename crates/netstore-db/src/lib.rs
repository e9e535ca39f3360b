//! # netstore-db: SQLite Persistence for Grid Networks
//!
//! This crate persists network models through SQLite with sqlx. Every
//! statement is generated from the mapping registry in `netstore-core`,
//! prepared once at startup and shared read-only afterwards.
//!
//! ## Request Path
//! ```text
//!   caller (REST layer, seed binary, tests)
//!     │  db.generators().get_all(uuid, variant)
//!     ▼
//!   EquipmentRepository<GeneratorAttributes>
//!     │  validate arguments ──✗──► DbError::InvalidArgument
//!     │  look up (Generator, SelectAll) in PreparedStatements
//!     ▼
//!   one pooled connection ──► bind params ──► SQLite
//!     │
//!     ▼
//!   rows ──► mapping registry ──► Vec<Resource<GeneratorAttributes>>
//! ```
//!
//! ## Variants
//! Every table is keyed by `(networkUuid, variantNum, id)`. Cloning a variant
//! copies the network row and every equipment row into the new number with
//! `INSERT .. SELECT`; from then on both variants evolve independently.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool, `Database` handle, repository accessors
//! - [`config`] - TOML file and environment configuration
//! - [`migrations`] - Embedded database migrations
//! - [`statements`] - Prepared statement cache
//! - [`row`] - Parameter binding and typed row access
//! - [`repository`] - Equipment and network repositories
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use netstore_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("netstore.db")).await?;
//!
//! db.networks().create(&[network]).await?;
//! db.generators().create(uuid, &generators).await?;
//!
//! db.networks().clone_variant(uuid, 0, 1, None).await?;
//! let forked = db.generators().get_all(uuid, 1).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod row;
pub mod statements;

#[cfg(test)]
mod fixtures;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, StoreConfig};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use statements::PreparedStatements;

// Repository re-exports for convenience
pub use repository::{EquipmentRepository, NetworkRepository};

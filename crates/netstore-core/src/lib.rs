//! # netstore-core: Resource Model and Mapping for the Network Store
//!
//! This crate holds everything about network persistence that does not touch
//! a database: the resource model, one attribute type per equipment kind,
//! the field ⇄ column mapping registry and the SQL statement catalog.
//!
//! ## Layering
//! ```text
//!   netstore-db    pool, migrations, statement cache, repositories
//!        │
//!        ▼
//!   netstore-core  (this crate, no I/O)
//!        resource ──► mapping ──► catalog
//!            ▲                       │
//!            └──── validation        └──► SQL text per (kind, statement)
//! ```
//!
//! Attribute structs never see a column name. The mapping registry lists,
//! per equipment kind, which column each field lands in and how it is
//! encoded; the catalog turns the same registry into SQL.
//!
//! ## Modules
//!
//! - [`types`] - Resource kinds, table layouts, info records
//! - [`resource`] - `Resource<A>` and the kind-tagged `Identifiable`
//! - [`attributes`] - Attribute structs and nested value objects
//! - [`mapping`] - Column types, `ColumnField`, per-kind mapping registry
//! - [`catalog`] - Parameterized SQL text per statement shape
//! - [`validation`] - Argument rules checked before any backend call
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use netstore_core::attributes::GeneratorAttributes;
//! use netstore_core::mapping::Attributes;
//! use netstore_core::{catalog, Resource};
//!
//! let generator = Resource::new(
//!     "G1",
//!     0,
//!     GeneratorAttributes {
//!         voltage_level_id: "VL1".to_string(),
//!         target_p: 400.0,
//!         ..Default::default()
//!     },
//! );
//!
//! let mapping = GeneratorAttributes::mapping();
//! let values = mapping.values(&generator.attributes).unwrap();
//! assert_eq!(values.len(), mapping.schema().columns.len());
//!
//! let statements = catalog::statements_for(mapping.schema());
//! assert!(!statements.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod attributes;
pub mod catalog;
pub mod error;
pub mod mapping;
pub mod resource;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::StatementKind;
pub use error::{ColumnError, MappingError, ValidationError};
pub use resource::{Identifiable, Resource};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Variant number of the initial variant. Never deletable.
pub const INITIAL_VARIANT_NUM: i32 = 0;

/// Variant id given to the initial variant when the caller supplies none.
pub const INITIAL_VARIANT_ID: &str = "InitialState";

/// Resources written per batch by create/update.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Maximum length of a resource or variant id.
pub const MAX_ID_LENGTH: usize = 255;

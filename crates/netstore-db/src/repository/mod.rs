//! # Repository Module
//!
//! Repositories orchestrate cached statements, the mapping registry and the
//! row adapter into the caller-facing operations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Call Path                                 │
//! │                                                                         │
//! │  db.generators().create(uuid, &generators)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EquipmentRepository<GeneratorAttributes>                              │
//! │  ├── validate arguments        (netstore-core::validation)             │
//! │  ├── build value lists         (AttributeMapping::values)              │
//! │  ├── look up statement         (PreparedStatements::get)               │
//! │  └── bind + execute per batch  (row::bind_values)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Every call acquires exactly one pooled connection per unit of work   │
//! │  (one per batch for writes) and never holds two at once.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`EquipmentRepository`] - Generic CRUD for all 17 equipment kinds
//! - [`NetworkRepository`] - Network rows, variant clone/delete protocol

pub mod equipment;
pub mod network;

#[cfg(test)]
mod tests;

pub use equipment::EquipmentRepository;
pub use network::NetworkRepository;

use std::sync::Arc;

use netstore_core::catalog;
use netstore_core::mapping::Attributes;
use netstore_core::{Resource, ResourceType, StatementKind};
use sqlx::sqlite::{SqliteRow, SqliteStatement};
use sqlx::{SqliteConnection, SqlitePool, Statement};
use uuid::Uuid;

use crate::error::DbResult;
use crate::row::RowReader;
use crate::statements::PreparedStatements;

/// Shared handles every repository needs.
#[derive(Debug, Clone)]
pub(crate) struct RepositoryContext {
    pub(crate) pool: SqlitePool,
    pub(crate) statements: Arc<PreparedStatements>,
    pub(crate) batch_size: usize,
}

impl RepositoryContext {
    pub(crate) fn new(
        pool: SqlitePool,
        statements: Arc<PreparedStatements>,
        batch_size: usize,
    ) -> Self {
        RepositoryContext {
            pool,
            statements,
            batch_size,
        }
    }

    pub(crate) fn statement(
        &self,
        kind: ResourceType,
        operation: StatementKind,
    ) -> DbResult<&SqliteStatement<'static>> {
        self.statements.get(kind, operation)
    }
}

/// Stored form of a network uuid.
pub(crate) fn uuid_text(uuid: Uuid) -> String {
    uuid.hyphenated().to_string()
}

/// Splits `items` into consecutive batches of at most `size` items.
///
/// A batch shares one pooled connection and one `debug!` event. It is not a
/// transaction: each row is its own autocommitted statement, so a failure
/// keeps the rows already written, in this batch and in earlier ones.
pub(crate) fn into_batches<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    let mut batches = Vec::with_capacity(items.len().div_ceil(size));
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        batches.push(items.by_ref().take(size).collect());
    }
    batches
}

/// Builds an equipment resource from a select result row.
pub(crate) fn read_equipment<A: Attributes>(
    row: &SqliteRow,
    variant_num: i32,
) -> DbResult<Resource<A>> {
    let mapping = A::mapping();
    let reader = RowReader::new(row, mapping.schema());
    let id = reader.text(0)?;
    let offset = catalog::select_prefix_len(&A::RESOURCE_TYPE.layout());
    let attributes = mapping.read(reader.values(offset)?)?;
    Ok(Resource::new(id, variant_num, attributes))
}

/// Point lookup of one equipment row on an already acquired connection.
pub(crate) async fn select_one_on<A: Attributes>(
    conn: &mut SqliteConnection,
    statements: &PreparedStatements,
    network_uuid: &str,
    variant_num: i32,
    id: &str,
) -> DbResult<Option<Resource<A>>> {
    let row = statements
        .get(A::RESOURCE_TYPE, StatementKind::SelectOne)?
        .query()
        .bind(network_uuid.to_string())
        .bind(variant_num)
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

    row.map(|row| read_equipment::<A>(&row, variant_num))
        .transpose()
}

#[cfg(test)]
mod batch_tests {
    use super::*;

    #[test]
    fn test_into_batches_boundaries() {
        let sizes = |n: usize| -> Vec<usize> {
            into_batches((0..n).collect::<Vec<_>>(), 1000)
                .iter()
                .map(Vec::len)
                .collect()
        };

        assert!(sizes(0).is_empty());
        assert_eq!(sizes(1000), vec![1000]);
        assert_eq!(sizes(1001), vec![1000, 1]);
        assert_eq!(sizes(1999), vec![1000, 999]);
    }

    #[test]
    fn test_into_batches_keeps_order() {
        let batches = into_batches(vec![1, 2, 3, 4, 5], 2);
        assert_eq!(batches, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }
}

//! # Prepared Statement Cache
//!
//! Every statement shape of every table, prepared once at startup.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Statement Cache Lifecycle                            │
//! │                                                                         │
//! │  Database::new()                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for table in [network, substation, ..., configuredBus]:               │
//! │      for (kind, sql) in catalog::statements_for(schema):               │
//! │          prepare(sql) ── fails? ──► DbError::SchemaMismatch (abort)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<PreparedStatements>  (immutable, shared by every repository)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Preparing doubles as the schema check: SQLite rejects a statement naming
//! a missing table or column, so an unprovisioned or stale schema stops the
//! store at startup instead of failing the first request.

use std::collections::HashMap;

use netstore_core::catalog::{self, StatementKind};
use netstore_core::mapping::schema_for;
use netstore_core::ResourceType;
use sqlx::sqlite::SqliteStatement;
use sqlx::{Executor, SqlitePool, Statement};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Immutable `(table, statement kind) → prepared statement` map.
#[derive(Debug)]
pub struct PreparedStatements {
    statements: HashMap<(ResourceType, StatementKind), SqliteStatement<'static>>,
}

impl PreparedStatements {
    /// Prepares every statement shape for the network table and all
    /// equipment tables.
    ///
    /// ## Errors
    /// `DbError::SchemaMismatch` naming the first table/statement that the
    /// backend refused.
    pub async fn prepare(pool: &SqlitePool) -> DbResult<Self> {
        let mut conn = pool.acquire().await?;
        let mut statements = HashMap::new();

        for kind in ResourceType::ALL {
            for (operation, sql) in catalog::statements_for(schema_for(kind)) {
                let prepared = (&mut *conn).prepare(sql.as_str()).await.map_err(|e| {
                    DbError::SchemaMismatch {
                        table: kind.table_name().to_string(),
                        operation: operation.to_string(),
                        message: e.to_string(),
                    }
                })?;
                debug!(table = %kind, statement = %operation, "Prepared statement");
                statements.insert((kind, operation), Statement::to_owned(&prepared));
            }
        }

        info!(
            tables = ResourceType::ALL.len(),
            statements = statements.len(),
            "Prepared statement cache built"
        );

        Ok(PreparedStatements { statements })
    }

    /// Looks up a prepared statement.
    ///
    /// A miss means the caller asked for a shape the table does not have
    /// (e.g. a container lookup on substations).
    pub fn get(
        &self,
        kind: ResourceType,
        operation: StatementKind,
    ) -> DbResult<&SqliteStatement<'static>> {
        self.statements.get(&(kind, operation)).ok_or_else(|| {
            DbError::Internal(format!("no {operation} statement for table {kind}"))
        })
    }

    /// Number of cached statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_cache_covers_every_table() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let statements = db.statements();

        for kind in ResourceType::ALL {
            assert!(statements.get(kind, StatementKind::Insert).is_ok(), "{kind}");
            assert!(statements.get(kind, StatementKind::CloneVariant).is_ok(), "{kind}");
        }
        assert!(statements
            .get(ResourceType::Network, StatementKind::ListVariants)
            .is_ok());
        assert!(statements
            .get(ResourceType::Substation, StatementKind::SelectByContainer)
            .is_err());

        let expected: usize = ResourceType::ALL
            .iter()
            .map(|kind| catalog::statements_for(schema_for(*kind)).len())
            .sum();
        assert_eq!(statements.len(), expected);
    }

    #[tokio::test]
    async fn test_missing_schema_fails_fast() {
        let config = DbConfig::in_memory().run_migrations(false);
        let err = Database::new(config).await.unwrap_err();

        match err {
            DbError::SchemaMismatch { table, .. } => assert_eq!(table, "network"),
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }
}

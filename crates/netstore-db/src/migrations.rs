//! # Schema Migrations
//!
//! The network table and the 17 equipment tables are provisioned by SQL
//! files embedded at compile time from `migrations/sqlite/`.
//!
//! ```text
//!   Database::new()
//!        │ run_migrations = true
//!        ▼
//!   MIGRATOR.run(pool)     applies files not yet in _sqlx_migrations,
//!        │                 each in its own transaction, in name order
//!        ▼
//!   PreparedStatements     prepares every shape against the result
//! ```
//!
//! ## Evolving the schema
//!
//! Columns come from the mapping declarations, so a new attribute field needs
//! both a `register_mapping!` entry and a new `NNN_description.sql` file that
//! adds the column. Applied files are checksummed: never edit one, add the
//! next number instead.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies the embedded migrations not yet recorded. Re-running is a no-op.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;

    info!(migrations = MIGRATOR.migrations.len(), "Schema up to date");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)`.
///
/// A database that was never migrated reports zero applied migrations.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let tracked: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    if tracked == 0 {
        return Ok((total, 0));
    }

    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok((total, usize::try_from(applied).unwrap_or(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use netstore_core::mapping::schema_for;
    use netstore_core::ResourceType;
    use sqlx::Row;

    #[tokio::test]
    async fn test_migration_status() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (total, applied) = migration_status(db.pool()).await.unwrap();

        assert!(total >= 1);
        assert_eq!(total, applied);

        // Re-running is a no-op.
        run_migrations(db.pool()).await.unwrap();
        assert_eq!(migration_status(db.pool()).await.unwrap(), (total, applied));
    }

    #[tokio::test]
    async fn test_schema_declares_mapped_column_types() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        for kind in ResourceType::ALL {
            let rows = sqlx::query(&format!("PRAGMA table_info(\"{}\")", kind.table_name()))
                .fetch_all(db.pool())
                .await
                .unwrap();

            for column in &schema_for(kind).columns {
                let declared: String = rows
                    .iter()
                    .find(|row| row.get::<String, _>("name") == column.name)
                    .map(|row| row.get("type"))
                    .unwrap_or_else(|| panic!("{kind}.{} missing", column.name));

                assert_eq!(
                    declared,
                    column.column_type.sql_type(),
                    "{kind}.{}",
                    column.name
                );
            }
        }
    }
}

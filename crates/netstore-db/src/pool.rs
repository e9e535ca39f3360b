//! # Store Handle
//!
//! Connection pool creation, schema provisioning and the statement cache.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Startup                                   │
//! │                                                                         │
//! │  DbConfig::new(path).batch_size(..)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       │  1. connect SqlitePool                                          │
//! │       │  2. run embedded migrations (unless disabled)                   │
//! │       │  3. prepare every statement (fail fast on schema mismatch)      │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ Database                                 │                           │
//! │  │   SqlitePool                             │                           │
//! │  │   Arc<PreparedStatements>  (read-only)   │                           │
//! │  │   batch_size                             │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.generators() / db.lines() / db.networks() ...                      │
//! │  (cheap handles; each call acquires its own pooled connection)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File databases run in WAL mode so readers and writers of different
//! variants do not block each other.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use netstore_core::attributes::*;
use netstore_core::mapping::EquipmentAttributes;
use netstore_core::validation::validate_batch_size;
use netstore_core::DEFAULT_BATCH_SIZE;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::{EquipmentRepository, NetworkRepository, RepositoryContext};
use crate::statements::PreparedStatements;

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Pool, schema and write settings for [`Database::new`].
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/netstore/netstore.db")
///     .max_connections(8)
///     .batch_size(500);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Pool ceiling (default 5).
    pub max_connections: u32,

    /// Connections kept open while idle (default 1).
    pub min_connections: u32,

    /// How long a call waits for a free connection (default 30s).
    pub connect_timeout: Duration,

    /// Idle connections above the minimum are closed after this (default 10 min).
    pub idle_timeout: Duration,

    /// Apply embedded migrations in `Database::new` (default on).
    pub run_migrations: bool,

    /// Resources written per batch by create/update (default 1000).
    pub batch_size: usize,
}

impl DbConfig {
    /// File-backed store at `path`, created on first connect.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Sets the write batch size.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Private in-memory store, used by tests.
    ///
    /// One connection that is never recycled: an in-memory SQLite database
    /// lives exactly as long as its connection.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Whether this configuration targets an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap: the pool and the statement cache are shared.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./netstore.db")).await?;
///
/// db.networks().create(&[network]).await?;
/// db.generators().create(uuid, &generators).await?;
/// db.networks().clone_variant(uuid, 0, 1, Some("study")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    /// Statements prepared at startup, shared read-only.
    statements: Arc<PreparedStatements>,
    /// Resources per write batch.
    batch_size: usize,
}

impl Database {
    /// Creates the pool, provisions the schema and builds the statement cache.
    ///
    /// ## Errors
    /// * `ConnectionFailed` - Pool could not be created
    /// * `MigrationFailed` - Embedded migrations failed
    /// * `SchemaMismatch` - A statement could not be prepared against the schema
    /// * `InvalidArgument` - Batch size of zero
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        validate_batch_size(config.batch_size)?;

        info!(
            path = %config.database_path.display(),
            batch_size = config.batch_size,
            "Opening network store"
        );

        let pool = if config.is_in_memory() {
            let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .acquire_timeout(config.connect_timeout)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(connect_options)
                .await
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

            let connect_options = SqliteConnectOptions::from_str(&connect_url)
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true);

            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(config.connect_timeout)
                .idle_timeout(Some(config.idle_timeout))
                .connect_with(connect_options)
                .await
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        };

        debug!(max_connections = config.max_connections, "Pool ready");

        if config.run_migrations {
            migrations::run_migrations(&pool).await?;
        }

        let statements = PreparedStatements::prepare(&pool).await?;

        Ok(Database {
            pool,
            statements: Arc::new(statements),
            batch_size: config.batch_size,
        })
    }

    /// Underlying pool, for ad-hoc queries and migrations.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the statement cache.
    pub fn statements(&self) -> &PreparedStatements {
        &self.statements
    }

    /// Resources per write batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn context(&self) -> RepositoryContext {
        RepositoryContext::new(self.pool.clone(), Arc::clone(&self.statements), self.batch_size)
    }

    // -------------------------------------------------------------------------
    // Repositories
    // -------------------------------------------------------------------------

    /// Network rows plus the cross-table variant protocol.
    pub fn networks(&self) -> NetworkRepository {
        NetworkRepository::new(self.context())
    }

    /// Generic repository for any equipment kind.
    ///
    /// ```rust,ignore
    /// let loads = db.equipment::<LoadAttributes>().get_all(uuid, 0).await?;
    /// ```
    pub fn equipment<A: EquipmentAttributes>(&self) -> EquipmentRepository<A> {
        EquipmentRepository::new(self.context())
    }

    pub fn substations(&self) -> EquipmentRepository<SubstationAttributes> {
        self.equipment()
    }

    pub fn voltage_levels(&self) -> EquipmentRepository<VoltageLevelAttributes> {
        self.equipment()
    }

    pub fn generators(&self) -> EquipmentRepository<GeneratorAttributes> {
        self.equipment()
    }

    pub fn batteries(&self) -> EquipmentRepository<BatteryAttributes> {
        self.equipment()
    }

    pub fn loads(&self) -> EquipmentRepository<LoadAttributes> {
        self.equipment()
    }

    pub fn shunt_compensators(&self) -> EquipmentRepository<ShuntCompensatorAttributes> {
        self.equipment()
    }

    pub fn vsc_converter_stations(&self) -> EquipmentRepository<VscConverterStationAttributes> {
        self.equipment()
    }

    pub fn lcc_converter_stations(&self) -> EquipmentRepository<LccConverterStationAttributes> {
        self.equipment()
    }

    pub fn static_var_compensators(&self) -> EquipmentRepository<StaticVarCompensatorAttributes> {
        self.equipment()
    }

    pub fn busbar_sections(&self) -> EquipmentRepository<BusbarSectionAttributes> {
        self.equipment()
    }

    pub fn switches(&self) -> EquipmentRepository<SwitchAttributes> {
        self.equipment()
    }

    pub fn two_windings_transformers(
        &self,
    ) -> EquipmentRepository<TwoWindingsTransformerAttributes> {
        self.equipment()
    }

    pub fn three_windings_transformers(
        &self,
    ) -> EquipmentRepository<ThreeWindingsTransformerAttributes> {
        self.equipment()
    }

    pub fn lines(&self) -> EquipmentRepository<LineAttributes> {
        self.equipment()
    }

    pub fn hvdc_lines(&self) -> EquipmentRepository<HvdcLineAttributes> {
        self.equipment()
    }

    pub fn dangling_lines(&self) -> EquipmentRepository<DanglingLineAttributes> {
        self.equipment()
    }

    pub fn configured_buses(&self) -> EquipmentRepository<ConfiguredBusAttributes> {
        self.equipment()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Closes every pooled connection. Later repository calls fail with
    /// `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing network store");
        self.pool.close().await;
    }

    /// Whether a trivial query still round-trips.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

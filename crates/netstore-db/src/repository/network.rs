//! # Network Repository
//!
//! Network rows and the operations spanning every table of a network:
//! whole-network delete, variant delete, variant clone and network clone.
//!
//! ## Multi-table Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 clone_variant(uuid, 0 → 5)                              │
//! │                                                                         │
//! │  validate (source ≠ target, both ≥ 0)                                  │
//! │       │                                                                 │
//! │       ▼  one pooled connection, NO transaction                         │
//! │  network        INSERT .. SELECT  (variantNum 5, new variantId)        │
//! │  substation     INSERT .. SELECT                                        │
//! │  voltageLevel   INSERT .. SELECT                                        │
//! │  ...            (fixed table order)                                     │
//! │  configuredBus  INSERT .. SELECT                                        │
//! │                                                                         │
//! │  At-most-once, not atomic: a failure stops the loop, is logged with    │
//! │  the tables already copied, and leaves them in place. Delete the       │
//! │  target variant before retrying.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use netstore_core::attributes::*;
use netstore_core::catalog;
use netstore_core::error::ColumnError;
use netstore_core::mapping::Attributes;
use netstore_core::validation::{
    validate_clone_network, validate_clone_variant, validate_deletable_variant,
    validate_resource_id, validate_variant_id, validate_variant_num,
};
use netstore_core::{
    Identifiable, MappingError, NetworkInfos, Resource, ResourceType, StatementKind, VariantInfos,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{SqliteConnection, Statement};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{into_batches, select_one_on, uuid_text, RepositoryContext};
use crate::error::{DbError, DbResult};
use crate::row::{bind_values, RowReader};
use crate::statements::PreparedStatements;

const NETWORK: ResourceType = ResourceType::Network;

/// Tables a multi-table write has finished, reported when a later one fails.
struct Progress {
    operation: &'static str,
    network_uuid: Uuid,
    completed: Vec<String>,
}

impl Progress {
    fn new(operation: &'static str, network_uuid: Uuid) -> Self {
        Progress {
            operation,
            network_uuid,
            completed: Vec::new(),
        }
    }

    fn record<T>(&mut self, step: String, result: Result<T, sqlx::Error>) -> DbResult<T> {
        match result {
            Ok(value) => {
                self.completed.push(step);
                Ok(value)
            }
            Err(err) => {
                let err = DbError::from(err);
                error!(
                    operation = self.operation,
                    network = %self.network_uuid,
                    failed = %step,
                    completed = ?self.completed,
                    error = %err,
                    "Multi-table write stopped part way"
                );
                Err(err)
            }
        }
    }
}

/// Repository for network rows and variant management.
///
/// ## Usage
/// ```rust,ignore
/// let networks = db.networks();
///
/// networks.create(&[Resource::new("N", 0, attributes)]).await?;
/// networks.clone_variant(uuid, 0, 1, Some("study")).await?;
/// let variants = networks.list_variants(uuid).await?;
/// ```
#[derive(Debug, Clone)]
pub struct NetworkRepository {
    ctx: RepositoryContext,
}

impl NetworkRepository {
    pub(crate) fn new(ctx: RepositoryContext) -> Self {
        NetworkRepository { ctx }
    }

    // -------------------------------------------------------------------------
    // Network rows
    // -------------------------------------------------------------------------

    /// Inserts network rows, one per `(uuid, variantNum)`.
    ///
    /// An empty `variant_id` is stored as `InitialState` for variant 0 and as
    /// a generated token otherwise.
    pub async fn create(&self, networks: &[Resource<NetworkAttributes>]) -> DbResult<()> {
        let mapping = NetworkAttributes::mapping();
        let mut rows = Vec::with_capacity(networks.len());

        for network in networks {
            validate_resource_id(&network.id)?;
            validate_variant_num(network.variant_num)?;
            let variant_id = network.attributes.effective_variant_id(network.variant_num);
            validate_variant_id(&variant_id)?;

            rows.push((
                uuid_text(network.attributes.uuid),
                network.variant_num,
                variant_id,
                network.id.clone(),
                mapping.values(&network.attributes)?,
            ));
        }

        let statement = self.ctx.statement(NETWORK, StatementKind::Insert)?;

        for (index, batch) in into_batches(rows, self.ctx.batch_size).into_iter().enumerate() {
            let count = batch.len();
            let mut conn = self.ctx.pool.acquire().await?;

            for (uuid, variant_num, variant_id, id, values) in batch {
                let query = statement
                    .query()
                    .bind(uuid)
                    .bind(variant_num)
                    .bind(variant_id)
                    .bind(id);
                bind_values(query, values).execute(&mut *conn).await?;
            }

            debug!(table = %NETWORK, batch = index, rows = count, "Inserted batch");
        }

        Ok(())
    }

    /// Gets the network row of one variant.
    pub async fn get(
        &self,
        network_uuid: Uuid,
        variant_num: i32,
    ) -> DbResult<Option<Resource<NetworkAttributes>>> {
        let mut conn = self.ctx.pool.acquire().await?;
        let row = self
            .ctx
            .statement(NETWORK, StatementKind::SelectOne)?
            .query()
            .bind(uuid_text(network_uuid))
            .bind(variant_num)
            .fetch_optional(&mut *conn)
            .await?;

        row.map(|row| read_network(&row, network_uuid, variant_num))
            .transpose()
    }

    /// `(uuid, id)` of every stored network, ordered by id.
    pub async fn list_infos(&self) -> DbResult<Vec<NetworkInfos>> {
        let mut conn = self.ctx.pool.acquire().await?;
        let rows = self
            .ctx
            .statement(NETWORK, StatementKind::SelectNetworkInfos)?
            .query()
            .fetch_all(&mut *conn)
            .await?;

        rows.iter()
            .map(|row| -> DbResult<NetworkInfos> {
                let reader = RowReader::new(row, NetworkAttributes::mapping().schema());
                Ok(NetworkInfos {
                    uuid: parse_uuid(&reader.text(0)?)?,
                    id: reader.text(1)?,
                })
            })
            .collect()
    }

    /// Replaces id, variant id and attributes of existing network rows.
    ///
    /// An empty `variant_id` keeps the stored one.
    ///
    /// ## Returns
    /// Number of rows updated.
    pub async fn update(&self, networks: &[Resource<NetworkAttributes>]) -> DbResult<u64> {
        let mapping = NetworkAttributes::mapping();
        let mut rows = Vec::with_capacity(networks.len());

        for network in networks {
            validate_resource_id(&network.id)?;
            validate_variant_num(network.variant_num)?;
            let variant_id = Some(network.attributes.variant_id.clone()).filter(|v| !v.is_empty());

            rows.push((
                network.id.clone(),
                variant_id,
                mapping.values(&network.attributes)?,
                network.attributes.uuid,
                network.variant_num,
            ));
        }

        let statement = self.ctx.statement(NETWORK, StatementKind::Update)?;
        let mut updated = 0;

        for batch in into_batches(rows, self.ctx.batch_size) {
            let mut conn = self.ctx.pool.acquire().await?;

            for (id, variant_id, values, uuid, variant_num) in batch {
                let query = statement.query().bind(id).bind(variant_id);
                let result = bind_values(query, values)
                    .bind(uuid_text(uuid))
                    .bind(variant_num)
                    .execute(&mut *conn)
                    .await?;

                if result.rows_affected() == 0 {
                    warn!(network = %uuid, variant_num, "Network update matched no row");
                }
                updated += result.rows_affected();
            }
        }

        Ok(updated)
    }

    /// Deletes the network row, then every equipment row of the network.
    ///
    /// Not atomic. Re-running after a failure is safe: every statement is a
    /// delete-by-filter.
    ///
    /// ## Returns
    /// Total number of rows deleted across all tables.
    pub async fn delete(&self, network_uuid: Uuid) -> DbResult<u64> {
        let uuid = uuid_text(network_uuid);
        let mut conn = self.ctx.pool.acquire().await?;
        let mut progress = Progress::new("delete", network_uuid);
        let mut deleted = 0;

        for kind in std::iter::once(NETWORK).chain(ResourceType::EQUIPMENT) {
            let result = self
                .ctx
                .statement(kind, StatementKind::DeleteByNetwork)?
                .query()
                .bind(uuid.clone())
                .execute(&mut *conn)
                .await;
            deleted += progress.record(kind.to_string(), result)?.rows_affected();
        }

        info!(network = %network_uuid, rows = deleted, "Network deleted");
        Ok(deleted)
    }

    // -------------------------------------------------------------------------
    // Variants
    // -------------------------------------------------------------------------

    /// `(variantId, variantNum)` of every variant, ordered by number.
    pub async fn list_variants(&self, network_uuid: Uuid) -> DbResult<Vec<VariantInfos>> {
        let mut conn = self.ctx.pool.acquire().await?;
        list_variants_on(&mut conn, &self.ctx.statements, network_uuid).await
    }

    /// Deletes every row of one variant in every table.
    ///
    /// ## Errors
    /// * `InvalidArgument` - `variant_num` is 0 (the initial variant) or negative;
    ///   nothing is deleted
    pub async fn delete_variant(&self, network_uuid: Uuid, variant_num: i32) -> DbResult<u64> {
        validate_deletable_variant(network_uuid, variant_num)?;

        let uuid = uuid_text(network_uuid);
        let mut conn = self.ctx.pool.acquire().await?;
        let mut progress = Progress::new("delete_variant", network_uuid);
        let mut deleted = 0;

        for kind in std::iter::once(NETWORK).chain(ResourceType::EQUIPMENT) {
            let result = self
                .ctx
                .statement(kind, StatementKind::DeleteByVariant)?
                .query()
                .bind(uuid.clone())
                .bind(variant_num)
                .execute(&mut *conn)
                .await;
            deleted += progress.record(kind.to_string(), result)?.rows_affected();
        }

        info!(network = %network_uuid, variant_num, rows = deleted, "Variant deleted");
        Ok(deleted)
    }

    /// Copies every row of `source` into `target` inside the database.
    ///
    /// The network row is copied first with `target_variant_id` (generated
    /// when `None`), then each equipment table in the fixed order.
    ///
    /// ## Returns
    /// Total number of rows copied.
    ///
    /// ## Errors
    /// * `InvalidArgument` - `source == target` or a negative number
    /// * `UniqueViolation` - Target variant number or variant id already in use
    pub async fn clone_variant(
        &self,
        network_uuid: Uuid,
        source_variant_num: i32,
        target_variant_num: i32,
        target_variant_id: Option<&str>,
    ) -> DbResult<u64> {
        validate_clone_variant(source_variant_num, target_variant_num)?;
        let variant_id = match target_variant_id {
            Some(id) => {
                validate_variant_id(id)?;
                id.to_string()
            }
            None => default_variant_id(target_variant_num),
        };

        let uuid = uuid_text(network_uuid);
        let mut conn = self.ctx.pool.acquire().await?;
        let mut progress = Progress::new("clone_variant", network_uuid);

        let result = self
            .ctx
            .statement(NETWORK, StatementKind::CloneVariant)?
            .query()
            .bind(target_variant_num)
            .bind(variant_id.clone())
            .bind(uuid.clone())
            .bind(source_variant_num)
            .execute(&mut *conn)
            .await;
        let network_rows = progress.record(NETWORK.to_string(), result)?.rows_affected();

        if network_rows == 0 {
            warn!(
                network = %network_uuid,
                source_variant_num,
                "Source variant has no network row"
            );
        }

        let mut copied = network_rows;
        for kind in ResourceType::EQUIPMENT {
            let result = self
                .ctx
                .statement(kind, StatementKind::CloneVariant)?
                .query()
                .bind(target_variant_num)
                .bind(uuid.clone())
                .bind(source_variant_num)
                .execute(&mut *conn)
                .await;
            let result = progress.record(kind.to_string(), result)?;

            debug!(table = %kind, rows = result.rows_affected(), "Cloned table");
            copied += result.rows_affected();
        }

        info!(
            network = %network_uuid,
            source_variant_num,
            target_variant_num,
            variant_id = %variant_id,
            rows = copied,
            "Variant cloned"
        );
        Ok(copied)
    }

    /// Copies the named variants of `source` into a new network identity.
    ///
    /// Each variant keeps its number and id. Every requested id is checked
    /// against the source before anything is written.
    ///
    /// ## Errors
    /// * `InvalidArgument` - Same uuid for source and target, or no variant ids
    /// * `NotFound` - A requested variant id does not exist in the source
    pub async fn clone_network(
        &self,
        target_network_uuid: Uuid,
        source_network_uuid: Uuid,
        target_variant_ids: &[String],
    ) -> DbResult<u64> {
        validate_clone_network(target_network_uuid, source_network_uuid, target_variant_ids)?;

        let mut conn = self.ctx.pool.acquire().await?;
        let variants =
            list_variants_on(&mut conn, &self.ctx.statements, source_network_uuid).await?;

        if let Some(missing) = target_variant_ids
            .iter()
            .find(|id| !variants.iter().any(|v| &v.id == *id))
        {
            return Err(DbError::not_found("Variant", missing.as_str()));
        }

        let target = uuid_text(target_network_uuid);
        let source = uuid_text(source_network_uuid);
        let mut progress = Progress::new("clone_network", target_network_uuid);
        let mut copied = 0;

        for variant in variants
            .iter()
            .filter(|v| target_variant_ids.contains(&v.id))
        {
            let result = self
                .ctx
                .statement(NETWORK, StatementKind::CloneNetwork)?
                .query()
                .bind(variant.num)
                .bind(variant.id.clone())
                .bind(target.clone())
                .bind(source.clone())
                .bind(variant.num)
                .execute(&mut *conn)
                .await;
            copied += progress
                .record(format!("{NETWORK}#{}", variant.num), result)?
                .rows_affected();

            for kind in ResourceType::EQUIPMENT {
                let result = self
                    .ctx
                    .statement(kind, StatementKind::CloneNetwork)?
                    .query()
                    .bind(variant.num)
                    .bind(target.clone())
                    .bind(source.clone())
                    .bind(variant.num)
                    .execute(&mut *conn)
                    .await;
                copied += progress
                    .record(format!("{kind}#{}", variant.num), result)?
                    .rows_affected();
            }

            debug!(variant = %variant.id, num = variant.num, "Cloned variant into network");
        }

        info!(
            source = %source_network_uuid,
            target = %target_network_uuid,
            variants = target_variant_ids.len(),
            rows = copied,
            "Network cloned"
        );
        Ok(copied)
    }

    // -------------------------------------------------------------------------
    // Identifiables
    // -------------------------------------------------------------------------

    /// Finds an equipment by id without knowing its kind.
    ///
    /// Tables are searched in the fixed order; the first match wins.
    pub async fn get_identifiable(
        &self,
        network_uuid: Uuid,
        variant_num: i32,
        id: &str,
    ) -> DbResult<Option<Identifiable>> {
        let uuid = uuid_text(network_uuid);
        let mut conn = self.ctx.pool.acquire().await?;
        let statements: &PreparedStatements = &self.ctx.statements;

        for kind in ResourceType::EQUIPMENT {
            let found = match kind {
                ResourceType::Substation => {
                    find::<SubstationAttributes>(&mut conn, statements, &uuid, variant_num, id).await?
                }
                ResourceType::VoltageLevel => {
                    find::<VoltageLevelAttributes>(&mut conn, statements, &uuid, variant_num, id)
                        .await?
                }
                ResourceType::Generator => {
                    find::<GeneratorAttributes>(&mut conn, statements, &uuid, variant_num, id).await?
                }
                ResourceType::Battery => {
                    find::<BatteryAttributes>(&mut conn, statements, &uuid, variant_num, id).await?
                }
                ResourceType::Load => {
                    find::<LoadAttributes>(&mut conn, statements, &uuid, variant_num, id).await?
                }
                ResourceType::ShuntCompensator => {
                    find::<ShuntCompensatorAttributes>(&mut conn, statements, &uuid, variant_num, id)
                        .await?
                }
                ResourceType::VscConverterStation => {
                    find::<VscConverterStationAttributes>(
                        &mut conn, statements, &uuid, variant_num, id,
                    )
                    .await?
                }
                ResourceType::LccConverterStation => {
                    find::<LccConverterStationAttributes>(
                        &mut conn, statements, &uuid, variant_num, id,
                    )
                    .await?
                }
                ResourceType::StaticVarCompensator => {
                    find::<StaticVarCompensatorAttributes>(
                        &mut conn, statements, &uuid, variant_num, id,
                    )
                    .await?
                }
                ResourceType::BusbarSection => {
                    find::<BusbarSectionAttributes>(&mut conn, statements, &uuid, variant_num, id)
                        .await?
                }
                ResourceType::Switch => {
                    find::<SwitchAttributes>(&mut conn, statements, &uuid, variant_num, id).await?
                }
                ResourceType::TwoWindingsTransformer => {
                    find::<TwoWindingsTransformerAttributes>(
                        &mut conn, statements, &uuid, variant_num, id,
                    )
                    .await?
                }
                ResourceType::ThreeWindingsTransformer => {
                    find::<ThreeWindingsTransformerAttributes>(
                        &mut conn, statements, &uuid, variant_num, id,
                    )
                    .await?
                }
                ResourceType::Line => {
                    find::<LineAttributes>(&mut conn, statements, &uuid, variant_num, id).await?
                }
                ResourceType::HvdcLine => {
                    find::<HvdcLineAttributes>(&mut conn, statements, &uuid, variant_num, id).await?
                }
                ResourceType::DanglingLine => {
                    find::<DanglingLineAttributes>(&mut conn, statements, &uuid, variant_num, id)
                        .await?
                }
                ResourceType::ConfiguredBus => {
                    find::<ConfiguredBusAttributes>(&mut conn, statements, &uuid, variant_num, id)
                        .await?
                }
                ResourceType::Network => None,
            };

            if found.is_some() {
                return Ok(found);
            }
        }

        Ok(None)
    }
}

// =============================================================================
// Helpers
// =============================================================================

async fn find<A>(
    conn: &mut SqliteConnection,
    statements: &PreparedStatements,
    network_uuid: &str,
    variant_num: i32,
    id: &str,
) -> DbResult<Option<Identifiable>>
where
    A: Attributes,
    Identifiable: From<Resource<A>>,
{
    Ok(select_one_on::<A>(conn, statements, network_uuid, variant_num, id)
        .await?
        .map(Identifiable::from))
}

async fn list_variants_on(
    conn: &mut SqliteConnection,
    statements: &PreparedStatements,
    network_uuid: Uuid,
) -> DbResult<Vec<VariantInfos>> {
    let rows = statements
        .get(NETWORK, StatementKind::ListVariants)?
        .query()
        .bind(uuid_text(network_uuid))
        .fetch_all(&mut *conn)
        .await?;

    rows.iter()
        .map(|row| -> DbResult<VariantInfos> {
            let reader = RowReader::new(row, NetworkAttributes::mapping().schema());
            let num = reader.integer(1)?;
            Ok(VariantInfos {
                id: reader.text(0)?,
                num: i32::try_from(num).map_err(|_| MappingError::Column {
                    table: NETWORK.table_name(),
                    column: "variantNum",
                    source: ColumnError::IntegerOverflow(num),
                })?,
            })
        })
        .collect()
}

fn read_network(
    row: &SqliteRow,
    network_uuid: Uuid,
    variant_num: i32,
) -> DbResult<Resource<NetworkAttributes>> {
    let mapping = NetworkAttributes::mapping();
    let reader = RowReader::new(row, mapping.schema());

    let id = reader.text(0)?;
    let variant_id = reader.text(1)?;
    let offset = catalog::select_prefix_len(&NETWORK.layout());
    let mut attributes = mapping.read(reader.values(offset)?)?;
    attributes.uuid = network_uuid;
    attributes.variant_id = variant_id;

    Ok(Resource::new(id, variant_num, attributes))
}

fn parse_uuid(text: &str) -> DbResult<Uuid> {
    Uuid::parse_str(text).map_err(|e| {
        DbError::Mapping(MappingError::Column {
            table: NETWORK.table_name(),
            column: "uuid",
            source: ColumnError::invalid(text, e.to_string()),
        })
    })
}

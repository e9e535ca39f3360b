//! # Equipment Repository
//!
//! One generic repository serving every equipment table. The attribute type
//! picks the table, the statement set and the column mapping.
//!
//! ## Batched Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create / update                                      │
//! │                                                                         │
//! │  resources: [r0 .. r1998]                                              │
//! │       │                                                                 │
//! │       ▼  validate ids + variant numbers (nothing written on failure)   │
//! │       ▼  build every value list up front                               │
//! │       │                                                                 │
//! │  ┌──────────────────┐  ┌──────────────────┐                            │
//! │  │ batch 0 (1000)   │  │ batch 1 (999)    │   one connection each,     │
//! │  │ insert, insert.. │  │ insert, insert.. │   no transaction           │
//! │  └──────────────────┘  └──────────────────┘                            │
//! │                                                                         │
//! │  A failing row aborts the call; rows already written stay written.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::marker::PhantomData;

use netstore_core::mapping::{Attributes, ColumnValue, EquipmentAttributes};
use netstore_core::validation::{validate_resource_id, validate_variant_num};
use netstore_core::{Resource, StatementKind};
use sqlx::Statement;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{into_batches, read_equipment, select_one_on, uuid_text, RepositoryContext};
use crate::error::DbResult;
use crate::row::bind_values;

/// Repository for one equipment kind.
///
/// ## Usage
/// ```rust,ignore
/// let generators = db.generators();
///
/// generators.create(network_uuid, &[g1, g2]).await?;
/// let in_vl1 = generators.get_by_container(network_uuid, 0, "VL1").await?;
/// ```
pub struct EquipmentRepository<A> {
    ctx: RepositoryContext,
    _attributes: PhantomData<fn() -> A>,
}

impl<A> Clone for EquipmentRepository<A> {
    fn clone(&self) -> Self {
        EquipmentRepository {
            ctx: self.ctx.clone(),
            _attributes: PhantomData,
        }
    }
}

impl<A> std::fmt::Debug for EquipmentRepository<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EquipmentRepository")
            .field("batch_size", &self.ctx.batch_size)
            .finish()
    }
}

impl<A: EquipmentAttributes> EquipmentRepository<A> {
    pub(crate) fn new(ctx: RepositoryContext) -> Self {
        EquipmentRepository {
            ctx,
            _attributes: PhantomData,
        }
    }

    fn table(&self) -> &'static str {
        A::RESOURCE_TYPE.table_name()
    }

    /// Inserts resources in batches of `batch_size` (see `into_batches`).
    ///
    /// Rows are autocommitted one by one; a failure leaves earlier rows stored.
    ///
    /// ## Errors
    /// * `InvalidArgument` - Empty id or negative variant number (before any write)
    /// * `UniqueViolation` - `(networkUuid, variantNum, id)` already stored
    pub async fn create(&self, network_uuid: Uuid, resources: &[Resource<A>]) -> DbResult<()> {
        for resource in resources {
            validate_resource_id(&resource.id)?;
            validate_variant_num(resource.variant_num)?;
        }

        let mapping = A::mapping();
        let rows = resources
            .iter()
            .map(|r| -> DbResult<(i32, String, Vec<ColumnValue>)> {
                Ok((r.variant_num, r.id.clone(), mapping.values(&r.attributes)?))
            })
            .collect::<DbResult<Vec<_>>>()?;

        let statement = self.ctx.statement(A::RESOURCE_TYPE, StatementKind::Insert)?;
        let network = uuid_text(network_uuid);

        for (index, batch) in into_batches(rows, self.ctx.batch_size).into_iter().enumerate() {
            let count = batch.len();
            let mut conn = self.ctx.pool.acquire().await?;

            for (variant_num, id, values) in batch {
                let query = statement
                    .query()
                    .bind(network.clone())
                    .bind(variant_num)
                    .bind(id);
                bind_values(query, values).execute(&mut *conn).await?;
            }

            debug!(table = self.table(), batch = index, rows = count, "Inserted batch");
        }

        Ok(())
    }

    /// Gets one resource by id.
    ///
    /// ## Returns
    /// * `Ok(Some(resource))` - Found
    /// * `Ok(None)` - No such resource in this variant
    pub async fn get_one(
        &self,
        network_uuid: Uuid,
        variant_num: i32,
        id: &str,
    ) -> DbResult<Option<Resource<A>>> {
        let mut conn = self.ctx.pool.acquire().await?;
        select_one_on::<A>(
            &mut conn,
            &self.ctx.statements,
            &uuid_text(network_uuid),
            variant_num,
            id,
        )
        .await
    }

    /// Every resource of this kind in the variant.
    pub async fn get_all(&self, network_uuid: Uuid, variant_num: i32) -> DbResult<Vec<Resource<A>>> {
        let mut conn = self.ctx.pool.acquire().await?;
        let rows = self
            .ctx
            .statement(A::RESOURCE_TYPE, StatementKind::SelectAll)?
            .query()
            .bind(uuid_text(network_uuid))
            .bind(variant_num)
            .fetch_all(&mut *conn)
            .await?;

        debug!(table = self.table(), rows = rows.len(), "Selected variant");

        rows.iter()
            .map(|row| read_equipment::<A>(row, variant_num))
            .collect()
    }

    /// Resources attached to `container_id` through any container column.
    ///
    /// Branches match on either side; each resource is returned once even
    /// when several of its sides are attached to the container.
    ///
    /// ## Errors
    /// * `Internal` - This kind has no container column (substations, HVDC lines)
    pub async fn get_by_container(
        &self,
        network_uuid: Uuid,
        variant_num: i32,
        container_id: &str,
    ) -> DbResult<Vec<Resource<A>>> {
        let statement = self
            .ctx
            .statement(A::RESOURCE_TYPE, StatementKind::SelectByContainer)?;
        let sides = A::mapping().schema().container_columns.len();

        let mut query = statement
            .query()
            .bind(uuid_text(network_uuid))
            .bind(variant_num);
        for _ in 0..sides {
            query = query.bind(container_id.to_string());
        }

        let mut conn = self.ctx.pool.acquire().await?;
        let rows = query.fetch_all(&mut *conn).await?;

        let mut seen = HashSet::with_capacity(rows.len());
        let mut resources = Vec::with_capacity(rows.len());
        for row in &rows {
            let resource = read_equipment::<A>(row, variant_num)?;
            if seen.insert(resource.id.clone()) {
                resources.push(resource);
            }
        }

        debug!(
            table = self.table(),
            container = container_id,
            rows = resources.len(),
            "Selected by container"
        );
        Ok(resources)
    }

    /// Replaces the attributes of existing resources, in batches.
    ///
    /// Kinds with an update key (the container column) match on its stored
    /// value instead of reassigning it: a resource whose container id
    /// changed matches no row.
    ///
    /// ## Returns
    /// Number of rows updated. Resources with no matching row are skipped.
    pub async fn update(&self, network_uuid: Uuid, resources: &[Resource<A>]) -> DbResult<u64> {
        for resource in resources {
            validate_resource_id(&resource.id)?;
            validate_variant_num(resource.variant_num)?;
        }

        let mapping = A::mapping();
        let rows = resources
            .iter()
            .map(|r| -> DbResult<_> {
                let (set, key) = mapping.update_values(&r.attributes)?;
                Ok((r.variant_num, r.id.clone(), set, key))
            })
            .collect::<DbResult<Vec<_>>>()?;

        let statement = self.ctx.statement(A::RESOURCE_TYPE, StatementKind::Update)?;
        let network = uuid_text(network_uuid);
        let mut updated = 0;

        for (index, batch) in into_batches(rows, self.ctx.batch_size).into_iter().enumerate() {
            let count = batch.len();
            let mut conn = self.ctx.pool.acquire().await?;

            for (variant_num, id, set, key) in batch {
                let query = bind_values(statement.query(), set)
                    .bind(network.clone())
                    .bind(variant_num)
                    .bind(id.clone());
                let result = bind_values(query, key).execute(&mut *conn).await?;

                if result.rows_affected() == 0 {
                    warn!(table = self.table(), id = %id, variant_num, "Update matched no row");
                }
                updated += result.rows_affected();
            }

            debug!(table = self.table(), batch = index, rows = count, "Updated batch");
        }

        Ok(updated)
    }

    /// Deletes one resource.
    ///
    /// ## Returns
    /// Number of rows deleted (0 or 1).
    pub async fn delete(&self, network_uuid: Uuid, variant_num: i32, id: &str) -> DbResult<u64> {
        let mut conn = self.ctx.pool.acquire().await?;
        let result = self
            .ctx
            .statement(A::RESOURCE_TYPE, StatementKind::DeleteOne)?
            .query()
            .bind(uuid_text(network_uuid))
            .bind(variant_num)
            .bind(id.to_string())
            .execute(&mut *conn)
            .await?;

        debug!(table = self.table(), id, variant_num, "Deleted resource");
        Ok(result.rows_affected())
    }
}

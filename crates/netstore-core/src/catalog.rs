//! # Statement Catalog
//!
//! Pure functions producing parameterized SQL text from a table layout and a
//! column list. No backend access: the db crate prepares what this returns.
//!
//! ## Statement Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shape              Filter / Parameters (in bind order)                 │
//! │  ─────────────────  ─────────────────────────────────────────────────── │
//! │  SelectOne          networkUuid, variantNum, id                         │
//! │  SelectAll          networkUuid, variantNum                             │
//! │  SelectByContainer  networkUuid, variantNum, containerId (per column)   │
//! │  Insert             networkUuid, variantNum, id, columns...             │
//! │  Update             columns (key excluded)..., networkUuid, variantNum, │
//! │                     id [, key]                                          │
//! │  DeleteOne          networkUuid, variantNum, id                         │
//! │  DeleteByVariant    networkUuid, variantNum                             │
//! │  DeleteByNetwork    networkUuid                                         │
//! │  CloneVariant       targetNum, networkUuid, sourceNum                   │
//! │  CloneNetwork       targetNum, targetUuid, sourceUuid, sourceNum        │
//! │                                                                         │
//! │  Network table: keyed by (uuid, variantNum); the variantId travels      │
//! │  right after the target variantNum in clones, and `id` is a plain       │
//! │  column reassigned by updates.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are double-quoted so camelCase names survive verbatim.
//! Parameters are positional `?`.

use std::fmt;

use crate::mapping::TableSchema;
use crate::types::TableLayout;

// =============================================================================
// Statement Kind
// =============================================================================

/// One cached statement shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatementKind {
    SelectOne,
    SelectAll,
    SelectByContainer,
    Insert,
    Update,
    DeleteOne,
    DeleteByVariant,
    DeleteByNetwork,
    CloneVariant,
    CloneNetwork,
    /// Network table only: `(variantId, variantNum)` of every variant.
    ListVariants,
    /// Network table only: `(uuid, id)` of every network.
    SelectNetworkInfos,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::SelectOne => "select_one",
            StatementKind::SelectAll => "select_all",
            StatementKind::SelectByContainer => "select_by_container",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::DeleteOne => "delete_one",
            StatementKind::DeleteByVariant => "delete_by_variant",
            StatementKind::DeleteByNetwork => "delete_by_network",
            StatementKind::CloneVariant => "clone_variant",
            StatementKind::CloneNetwork => "clone_network",
            StatementKind::ListVariants => "list_variants",
            StatementKind::SelectNetworkInfos => "select_network_infos",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Double-quotes an identifier.
pub fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn quoted_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().map(quote).collect::<Vec<_>>().join(", ")
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Leading select columns: `id` for equipment, `id, variantId` for the network.
fn select_prefix<'a>(layout: &TableLayout) -> Vec<&'a str> {
    match layout.variant_id_column {
        Some(variant_id) => vec!["id", variant_id],
        None => vec!["id"],
    }
}

/// Number of fixed columns in front of the mapped ones in select results.
pub fn select_prefix_len(layout: &TableLayout) -> usize {
    select_prefix(layout).len()
}

fn select_list(layout: &TableLayout, columns: &[&str]) -> String {
    quoted_list(select_prefix(layout).into_iter().chain(columns.iter().copied()))
}

fn variant_filter(layout: &TableLayout) -> String {
    format!(
        "{} = ? AND {} = ?",
        quote(layout.network_column),
        quote("variantNum")
    )
}

/// Filter identifying one row: `(networkUuid, variantNum, id)`, or
/// `(uuid, variantNum)` for the network table.
fn row_filter(layout: &TableLayout) -> String {
    if layout.is_network() {
        variant_filter(layout)
    } else {
        format!("{} AND {} = ?", variant_filter(layout), quote("id"))
    }
}

// =============================================================================
// Select
// =============================================================================

pub fn select_one(layout: &TableLayout, columns: &[&str]) -> String {
    format!(
        "SELECT {} FROM {} WHERE {}",
        select_list(layout, columns),
        quote(layout.table),
        row_filter(layout)
    )
}

pub fn select_all(layout: &TableLayout, columns: &[&str]) -> String {
    format!(
        "SELECT {} FROM {} WHERE {}",
        select_list(layout, columns),
        quote(layout.table),
        variant_filter(layout)
    )
}

/// Rows of a variant attached to a container through any of
/// `container_columns` (OR-ed). Binds the container id once per column.
pub fn select_by_container(
    layout: &TableLayout,
    columns: &[&str],
    container_columns: &[&str],
) -> String {
    let containers = container_columns
        .iter()
        .map(|c| format!("{} = ?", quote(c)))
        .collect::<Vec<_>>()
        .join(" OR ");

    format!(
        "SELECT {} FROM {} WHERE {} AND ({})",
        select_list(layout, columns),
        quote(layout.table),
        variant_filter(layout),
        containers
    )
}

// =============================================================================
// Insert / Update
// =============================================================================

fn insert_prefix<'a>(layout: &TableLayout) -> Vec<&'a str> {
    match layout.variant_id_column {
        Some(variant_id) => vec![layout.network_column, "variantNum", variant_id, "id"],
        None => vec![layout.network_column, "variantNum", "id"],
    }
}

/// Full-row insert. Network: `(uuid, variantNum, variantId, id, columns...)`.
pub fn insert(layout: &TableLayout, columns: &[&str]) -> String {
    let names: Vec<&str> = insert_prefix(layout)
        .into_iter()
        .chain(columns.iter().copied())
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote(layout.table),
        quoted_list(names.iter().copied()),
        placeholders(names.len())
    )
}

/// Full-attribute replace.
///
/// `key_column` is removed from the SET list and appended to the WHERE
/// clause, so its stored value is matched rather than overwritten. The
/// network update also reassigns `id`, and `variantId` unless bound NULL.
pub fn update_by_key(layout: &TableLayout, columns: &[&str], key_column: Option<&str>) -> String {
    let mut assignments: Vec<String> = match layout.variant_id_column {
        Some(variant_id) => vec![
            format!("{} = ?", quote("id")),
            format!("{0} = COALESCE(?, {0})", quote(variant_id)),
        ],
        None => Vec::new(),
    };
    assignments.extend(
        columns
            .iter()
            .filter(|c| Some(**c) != key_column)
            .map(|c| format!("{} = ?", quote(c))),
    );

    let mut filter = row_filter(layout);
    if let Some(key) = key_column {
        filter.push_str(&format!(" AND {} = ?", quote(key)));
    }

    format!(
        "UPDATE {} SET {} WHERE {}",
        quote(layout.table),
        assignments.join(", "),
        filter
    )
}

// =============================================================================
// Delete
// =============================================================================

pub fn delete_one(layout: &TableLayout) -> String {
    format!("DELETE FROM {} WHERE {}", quote(layout.table), row_filter(layout))
}

pub fn delete_by_variant(layout: &TableLayout) -> String {
    format!(
        "DELETE FROM {} WHERE {}",
        quote(layout.table),
        variant_filter(layout)
    )
}

pub fn delete_by_network(layout: &TableLayout) -> String {
    format!(
        "DELETE FROM {} WHERE {} = ?",
        quote(layout.table),
        quote(layout.network_column)
    )
}

// =============================================================================
// Clone
// =============================================================================

/// In-database copy of one variant's rows into another variant number.
///
/// Equipment params: `(targetVariantNum, networkUuid, sourceVariantNum)`.
/// Network params: `(targetVariantNum, targetVariantId, uuid, sourceVariantNum)`.
pub fn clone_variant(layout: &TableLayout, columns: &[&str]) -> String {
    let network = quote(layout.network_column);
    let (target, source) = match layout.variant_id_column {
        Some(variant_id) => (
            vec![quote("variantNum"), quote(variant_id), network.clone(), quote("id")],
            vec!["?".to_string(), "?".to_string(), network.clone(), quote("id")],
        ),
        None => (
            vec![quote("variantNum"), network.clone(), quote("id")],
            vec!["?".to_string(), network.clone(), quote("id")],
        ),
    };
    clone_statement(layout, columns, target, source)
}

/// Copy of one variant's rows into another network.
///
/// Equipment params: `(targetVariantNum, targetUuid, sourceUuid, sourceVariantNum)`.
/// Network params: `(targetVariantNum, targetVariantId, targetUuid, sourceUuid,
/// sourceVariantNum)`.
pub fn clone_network(layout: &TableLayout, columns: &[&str]) -> String {
    let network = quote(layout.network_column);
    let (target, source) = match layout.variant_id_column {
        Some(variant_id) => (
            vec![quote("variantNum"), quote(variant_id), network, quote("id")],
            vec!["?".to_string(), "?".to_string(), "?".to_string(), quote("id")],
        ),
        None => (
            vec![quote("variantNum"), network, quote("id")],
            vec!["?".to_string(), "?".to_string(), quote("id")],
        ),
    };
    clone_statement(layout, columns, target, source)
}

fn clone_statement(
    layout: &TableLayout,
    columns: &[&str],
    mut target: Vec<String>,
    mut source: Vec<String>,
) -> String {
    let mapped: Vec<String> = columns.iter().map(|c| quote(c)).collect();
    target.extend(mapped.iter().cloned());
    source.extend(mapped);

    format!(
        "INSERT INTO {table} ({}) SELECT {} FROM {table} WHERE {}",
        target.join(", "),
        source.join(", "),
        variant_filter(layout),
        table = quote(layout.table)
    )
}

// =============================================================================
// Network-only Queries
// =============================================================================

pub fn list_variants(layout: &TableLayout) -> String {
    format!(
        "SELECT {}, {} FROM {} WHERE {} = ? ORDER BY {}",
        quote(layout.variant_id_column.unwrap_or("variantId")),
        quote("variantNum"),
        quote(layout.table),
        quote(layout.network_column),
        quote("variantNum")
    )
}

/// `(uuid, id)` of every network, read from the initial variant row.
pub fn select_network_infos(layout: &TableLayout) -> String {
    format!(
        "SELECT {}, {} FROM {} WHERE {} = 0 ORDER BY {}",
        quote(layout.network_column),
        quote("id"),
        quote(layout.table),
        quote("variantNum"),
        quote("id")
    )
}

// =============================================================================
// Per-table Statement Set
// =============================================================================

/// Every statement shape applicable to `schema`'s table.
///
/// Equipment tables get the eight core shapes, plus SelectByContainer when
/// the kind has a container. The network table gets its own subset.
pub fn statements_for(schema: &TableSchema) -> Vec<(StatementKind, String)> {
    let layout = schema.layout();
    let columns = schema.column_names();

    let mut statements = vec![
        (StatementKind::SelectOne, select_one(&layout, &columns)),
        (StatementKind::Insert, insert(&layout, &columns)),
        (
            StatementKind::Update,
            update_by_key(&layout, &columns, schema.update_key),
        ),
        (StatementKind::DeleteByVariant, delete_by_variant(&layout)),
        (StatementKind::DeleteByNetwork, delete_by_network(&layout)),
        (StatementKind::CloneVariant, clone_variant(&layout, &columns)),
        (StatementKind::CloneNetwork, clone_network(&layout, &columns)),
    ];

    if layout.is_network() {
        statements.push((StatementKind::ListVariants, list_variants(&layout)));
        statements.push((StatementKind::SelectNetworkInfos, select_network_infos(&layout)));
    } else {
        statements.push((StatementKind::SelectAll, select_all(&layout, &columns)));
        statements.push((StatementKind::DeleteOne, delete_one(&layout)));
        if schema.has_container() {
            statements.push((
                StatementKind::SelectByContainer,
                select_by_container(&layout, &columns, &schema.container_columns),
            ));
        }
    }

    statements
}

// =============================================================================
// Unit Tests
// =============================================================================

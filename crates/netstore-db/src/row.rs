//! # Row Adapter
//!
//! Typed access to SQLite rows and parameter binding for [`ColumnValue`]s.
//!
//! ```text
//!   write:  ColumnValue ──bind_value──► ? parameter
//!           Json(v) is bound as JSON text
//!
//!   read:   SqliteRow[i] ──RowReader──► ColumnValue
//!           List/Json columns are parsed from JSON text
//!           TEXT found in a REAL column is handed on as Text ("NaN", ...)
//! ```

use netstore_core::error::{ColumnError, MappingError};
use netstore_core::mapping::{ColumnInfo, ColumnType, ColumnValue, TableSchema};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, TypeInfo, ValueRef};

use crate::error::DbResult;

/// Query produced by a cached statement.
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Binds one column value as the next positional parameter.
pub fn bind_value(query: SqliteQuery<'_>, value: ColumnValue) -> SqliteQuery<'_> {
    match value {
        ColumnValue::Null => query.bind(Option::<String>::None),
        ColumnValue::Boolean(b) => query.bind(b),
        ColumnValue::Integer(i) => query.bind(i),
        ColumnValue::Real(f) => query.bind(f),
        ColumnValue::Text(s) => query.bind(s),
        ColumnValue::Json(json) => query.bind(json.to_string()),
    }
}

/// Binds every value in order.
pub fn bind_values(
    query: SqliteQuery<'_>,
    values: impl IntoIterator<Item = ColumnValue>,
) -> SqliteQuery<'_> {
    values.into_iter().fold(query, bind_value)
}

/// Reads mapped columns out of a result row.
pub struct RowReader<'r> {
    row: &'r SqliteRow,
    schema: &'static TableSchema,
}

impl<'r> RowReader<'r> {
    pub fn new(row: &'r SqliteRow, schema: &'static TableSchema) -> Self {
        RowReader { row, schema }
    }

    /// Text value at `index` (fixed columns: id, variantId, uuid).
    pub fn text(&self, index: usize) -> DbResult<String> {
        Ok(self.row.try_get::<String, _>(index)?)
    }

    /// Integer value at `index`.
    pub fn integer(&self, index: usize) -> DbResult<i64> {
        Ok(self.row.try_get::<i64, _>(index)?)
    }

    /// Mapped column values, starting at result column `offset`.
    pub fn values(&self, offset: usize) -> DbResult<Vec<ColumnValue>> {
        self.schema
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| self.value(offset + i, column))
            .collect()
    }

    /// Storage class of the value itself, not the declared column type.
    fn holds_text(&self, index: usize) -> DbResult<bool> {
        let raw = self.row.try_get_raw(index)?;
        Ok(!raw.is_null() && raw.type_info().name() == "TEXT")
    }

    fn value(&self, index: usize, column: &ColumnInfo) -> DbResult<ColumnValue> {
        let value = match column.column_type {
            ColumnType::Boolean => self
                .row
                .try_get::<Option<bool>, _>(index)?
                .map_or(ColumnValue::Null, ColumnValue::Boolean),
            ColumnType::Integer => self
                .row
                .try_get::<Option<i64>, _>(index)?
                .map_or(ColumnValue::Null, ColumnValue::Integer),
            // Non-finite floats are stored as TEXT in REAL columns.
            ColumnType::Real if self.holds_text(index)? => self
                .row
                .try_get::<Option<String>, _>(index)?
                .map_or(ColumnValue::Null, ColumnValue::Text),
            ColumnType::Real => self
                .row
                .try_get::<Option<f64>, _>(index)?
                .map_or(ColumnValue::Null, ColumnValue::Real),
            ColumnType::Text => self
                .row
                .try_get::<Option<String>, _>(index)?
                .map_or(ColumnValue::Null, ColumnValue::Text),
            ColumnType::List | ColumnType::Json => {
                match self.row.try_get::<Option<String>, _>(index)? {
                    Some(text) => ColumnValue::Json(serde_json::from_str(&text).map_err(|e| {
                        MappingError::Column {
                            table: self.schema.table(),
                            column: column.name,
                            source: ColumnError::Json(e),
                        }
                    })?),
                    None => ColumnValue::Null,
                }
            }
        };
        Ok(value)
    }
}

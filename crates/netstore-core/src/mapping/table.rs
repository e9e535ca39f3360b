//! # Attribute Mapping Tables
//!
//! One [`AttributeMapping`] per attribute type: the ordered list of
//! `(column name, column type, getter, setter)` entries that drives every
//! statement shape and the row marshalling.
//!
//! ## Declaring a Mapping
//! ```rust
//! use netstore_core::mapping::AttributeMapping;
//! use netstore_core::ResourceType;
//!
//! #[derive(Default)]
//! struct Demo {
//!     voltage_level_id: String,
//!     target_p: f64,
//! }
//!
//! let mapping = AttributeMapping::<Demo>::builder(ResourceType::Generator)
//!     .column("voltageLevelId", |a| &a.voltage_level_id, |a| &mut a.voltage_level_id)
//!     .column("targetP", |a| &a.target_p, |a| &mut a.target_p)
//!     .container(&["voltageLevelId"])
//!     .update_key("voltageLevelId")
//!     .build();
//!
//! assert_eq!(mapping.schema().column_names(), vec!["voltageLevelId", "targetP"]);
//! assert_eq!(mapping.schema().update_columns(), vec!["targetP"]);
//! ```
//!
//! Field access is checked at compile time: a renamed field breaks the
//! mapping declaration, not a query at runtime.

use crate::error::{ColumnError, MappingError, MappingResult};
use crate::mapping::{ColumnField, ColumnType, ColumnValue};
use crate::types::{ResourceType, TableLayout};

// =============================================================================
// Schema (type-erased view)
// =============================================================================

/// Name and type of one mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub column_type: ColumnType,
}

/// Column layout of one table, independent of the attribute type.
///
/// This is what the statement catalog and the statement cache consume.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub resource_type: ResourceType,
    /// Mapped columns in declaration order (fixed key columns excluded).
    pub columns: Vec<ColumnInfo>,
    /// Foreign-key-like columns naming the container (voltage level, substation).
    pub container_columns: Vec<&'static str>,
    /// Column bound in the WHERE clause of updates instead of the SET list.
    pub update_key: Option<&'static str>,
}

impl TableSchema {
    /// Table name of this schema.
    #[inline]
    pub fn table(&self) -> &'static str {
        self.resource_type.table_name()
    }

    /// Fixed key layout of this table.
    #[inline]
    pub fn layout(&self) -> TableLayout {
        self.resource_type.layout()
    }

    /// Mapped column names in declaration order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Column names of the update SET list (declaration order, key excluded).
    pub fn update_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .map(|c| c.name)
            .filter(|name| Some(*name) != self.update_key)
            .collect()
    }

    /// Position of a column in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Whether equipment of this kind can be listed by container.
    #[inline]
    pub fn has_container(&self) -> bool {
        !self.container_columns.is_empty()
    }
}

// =============================================================================
// Mapping
// =============================================================================

type ReadFn<A> = Box<dyn Fn(&A) -> Result<ColumnValue, ColumnError> + Send + Sync>;
type WriteFn<A> = Box<dyn Fn(&mut A, ColumnValue) -> Result<(), ColumnError> + Send + Sync>;

struct ColumnAccess<A> {
    read: ReadFn<A>,
    write: WriteFn<A>,
}

/// Ordered field ⇄ column mapping for attribute type `A`.
pub struct AttributeMapping<A> {
    schema: TableSchema,
    access: Vec<ColumnAccess<A>>,
}

impl<A: 'static> AttributeMapping<A> {
    /// Starts a mapping declaration for the given resource type.
    pub fn builder(resource_type: ResourceType) -> MappingBuilder<A> {
        MappingBuilder {
            resource_type,
            columns: Vec::new(),
            access: Vec::new(),
            container_columns: Vec::new(),
            update_key: None,
        }
    }
}

impl<A> AttributeMapping<A> {
    /// Type-erased column layout.
    #[inline]
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Number of mapped columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.access.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.access.is_empty()
    }

    fn column_error(&self, index: usize, source: ColumnError) -> MappingError {
        MappingError::Column {
            table: self.schema.table(),
            column: self.schema.columns[index].name,
            source,
        }
    }

    /// Reads every mapped column of `attributes`, in declaration order.
    ///
    /// This is the positional value list bound to insert statements.
    pub fn values(&self, attributes: &A) -> MappingResult<Vec<ColumnValue>> {
        self.access
            .iter()
            .enumerate()
            .map(|(i, access)| (access.read)(attributes).map_err(|e| self.column_error(i, e)))
            .collect()
    }

    /// Reads the update SET values and, separately, the update key value.
    pub fn update_values(
        &self,
        attributes: &A,
    ) -> MappingResult<(Vec<ColumnValue>, Option<ColumnValue>)> {
        let mut set = Vec::with_capacity(self.access.len());
        let mut key = None;

        for (i, value) in self.values(attributes)?.into_iter().enumerate() {
            if Some(self.schema.columns[i].name) == self.schema.update_key {
                key = Some(value);
            } else {
                set.push(value);
            }
        }

        Ok((set, key))
    }

    /// Reads a single named column, `None` if the column is not mapped.
    pub fn value_of(&self, attributes: &A, column: &str) -> MappingResult<Option<ColumnValue>> {
        match self.schema.position(column) {
            Some(i) => (self.access[i].read)(attributes)
                .map(Some)
                .map_err(|e| self.column_error(i, e)),
            None => Ok(None),
        }
    }

    /// Writes `values` (declaration order) into `attributes`.
    pub fn apply(&self, attributes: &mut A, values: Vec<ColumnValue>) -> MappingResult<()> {
        if values.len() != self.access.len() {
            return Err(MappingError::ArityMismatch {
                table: self.schema.table(),
                expected: self.access.len(),
                actual: values.len(),
            });
        }

        for (i, (access, value)) in self.access.iter().zip(values).enumerate() {
            (access.write)(attributes, value).map_err(|e| self.column_error(i, e))?;
        }

        Ok(())
    }

    /// Builds a fresh attribute value from `values` (declaration order).
    pub fn read(&self, values: Vec<ColumnValue>) -> MappingResult<A>
    where
        A: Default,
    {
        let mut attributes = A::default();
        self.apply(&mut attributes, values)?;
        Ok(attributes)
    }
}

impl<A> std::fmt::Debug for AttributeMapping<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeMapping")
            .field("schema", &self.schema)
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Registration-style builder for [`AttributeMapping`].
pub struct MappingBuilder<A> {
    resource_type: ResourceType,
    columns: Vec<ColumnInfo>,
    access: Vec<ColumnAccess<A>>,
    container_columns: Vec<&'static str>,
    update_key: Option<&'static str>,
}

impl<A: 'static> MappingBuilder<A> {
    /// Maps one field onto column `name`.
    ///
    /// The column type comes from the field type's [`ColumnField`] impl.
    pub fn column<T: ColumnField + 'static>(
        mut self,
        name: &'static str,
        get: fn(&A) -> &T,
        get_mut: fn(&mut A) -> &mut T,
    ) -> Self {
        self.columns.push(ColumnInfo {
            name,
            column_type: T::COLUMN_TYPE,
        });
        self.access.push(ColumnAccess {
            read: Box::new(move |attributes: &A| get(attributes).to_column()),
            write: Box::new(move |attributes: &mut A, value: ColumnValue| {
                *get_mut(attributes) = T::from_column(value)?;
                Ok(())
            }),
        });
        self
    }

    /// Declares the container columns (OR-ed when there are several).
    pub fn container(mut self, columns: &[&'static str]) -> Self {
        self.container_columns.extend_from_slice(columns);
        self
    }

    /// Declares the column bound in the WHERE clause of updates.
    pub fn update_key(mut self, column: &'static str) -> Self {
        self.update_key = Some(column);
        self
    }

    /// Finishes the declaration.
    ///
    /// ## Panics
    /// On duplicate column names, or container/update-key columns that were
    /// never mapped. Both are declaration bugs caught by the registry tests.
    pub fn build(self) -> AttributeMapping<A> {
        let layout = self.resource_type.layout();
        for (i, column) in self.columns.iter().enumerate() {
            assert!(
                !self.columns[..i].iter().any(|c| c.name == column.name),
                "{}: column {} mapped twice",
                self.resource_type,
                column.name
            );
            assert!(
                !layout.fixed_columns().contains(&column.name),
                "{}: column {} collides with a key column",
                self.resource_type,
                column.name
            );
        }
        let known = |name: &&str| self.columns.iter().any(|c| c.name == *name);
        assert!(
            self.container_columns.iter().all(known),
            "{}: unmapped container column",
            self.resource_type
        );
        assert!(
            self.update_key.iter().all(known),
            "{}: unmapped update key",
            self.resource_type
        );

        AttributeMapping {
            schema: TableSchema {
                resource_type: self.resource_type,
                columns: self.columns,
                container_columns: self.container_columns,
                update_key: self.update_key,
            },
            access: self.access,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

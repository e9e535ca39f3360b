//! # Column Mapping
//!
//! Conversion between attribute fields and persisted column values.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Field ⇄ Column Mapping                             │
//! │                                                                         │
//! │  GeneratorAttributes.target_p: f64                                     │
//! │       │   ColumnField (this module): one Rust type ⇄ one ColumnValue   │
//! │       ▼                                                                 │
//! │  ColumnValue::Real(400.0)                                              │
//! │       │   AttributeMapping (table.rs): ordered (name, type, get, set)  │
//! │       ▼                                                                 │
//! │  "targetP" REAL                                                        │
//! │       │   Registry (registry.rs): one mapping per ResourceType         │
//! │       ▼                                                                 │
//! │  Statement catalog + row adapter                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Complex values (limits, tap changers, reactive limits, ...) are carried as
//! [`ColumnValue::Json`]; the db crate turns them into JSON text. Non-finite
//! floats are stored as text in both shapes (see [`float`]).

pub mod float;
pub mod registry;
pub mod table;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ColumnError;

pub use registry::{schema_for, Attributes, EquipmentAttributes};
pub use table::{AttributeMapping, ColumnInfo, MappingBuilder, TableSchema};

// =============================================================================
// Column Type
// =============================================================================

/// Persisted shape of a mapped column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Boolean,
    Integer,
    Real,
    Text,
    /// Collection of scalars, stored as a JSON array.
    List,
    /// Nested value object, stored as JSON and decoded by the codec layer.
    Json,
}

impl ColumnType {
    /// SQL type used in the schema for this column type.
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text | ColumnType::List | ColumnType::Json => "TEXT",
        }
    }

    /// Whether the value travels as JSON text on the wire.
    pub fn is_json_encoded(&self) -> bool {
        matches!(self, ColumnType::List | ColumnType::Json)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::List => "LIST",
            ColumnType::Json => "JSON",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Column Value
// =============================================================================

/// A backend-neutral column value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Json(serde_json::Value),
}

impl ColumnValue {
    /// Short name of the value shape, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ColumnValue::Null => "null",
            ColumnValue::Boolean(_) => "boolean",
            ColumnValue::Integer(_) => "integer",
            ColumnValue::Real(_) => "real",
            ColumnValue::Text(_) => "text",
            ColumnValue::Json(_) => "json",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    fn mismatch(&self, expected: ColumnType) -> ColumnError {
        ColumnError::TypeMismatch {
            expected,
            found: self.kind_name(),
        }
    }
}

// =============================================================================
// Column Field
// =============================================================================

/// A Rust type that maps onto exactly one column.
///
/// Implemented for scalars, strings, enums, collections and every nested
/// value object. `Option<T>` maps NULL to `None`.
pub trait ColumnField: Sized {
    /// Persisted shape of this field type.
    const COLUMN_TYPE: ColumnType;

    /// Converts the field into a column value.
    fn to_column(&self) -> Result<ColumnValue, ColumnError>;

    /// Rebuilds the field from a column value.
    fn from_column(value: ColumnValue) -> Result<Self, ColumnError>;
}

impl<T: ColumnField> ColumnField for Option<T> {
    const COLUMN_TYPE: ColumnType = T::COLUMN_TYPE;

    fn to_column(&self) -> Result<ColumnValue, ColumnError> {
        match self {
            Some(value) => value.to_column(),
            None => Ok(ColumnValue::Null),
        }
    }

    fn from_column(value: ColumnValue) -> Result<Self, ColumnError> {
        match value {
            ColumnValue::Null | ColumnValue::Json(serde_json::Value::Null) => Ok(None),
            other => T::from_column(other).map(Some),
        }
    }
}

impl ColumnField for bool {
    const COLUMN_TYPE: ColumnType = ColumnType::Boolean;

    fn to_column(&self) -> Result<ColumnValue, ColumnError> {
        Ok(ColumnValue::Boolean(*self))
    }

    fn from_column(value: ColumnValue) -> Result<Self, ColumnError> {
        match value {
            ColumnValue::Boolean(b) => Ok(b),
            // SQLite hands booleans back as 0/1
            ColumnValue::Integer(i) => Ok(i != 0),
            ColumnValue::Null => Err(ColumnError::UnexpectedNull),
            other => Err(other.mismatch(ColumnType::Boolean)),
        }
    }
}

impl ColumnField for i64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Integer;

    fn to_column(&self) -> Result<ColumnValue, ColumnError> {
        Ok(ColumnValue::Integer(*self))
    }

    fn from_column(value: ColumnValue) -> Result<Self, ColumnError> {
        match value {
            ColumnValue::Integer(i) => Ok(i),
            ColumnValue::Null => Err(ColumnError::UnexpectedNull),
            other => Err(other.mismatch(ColumnType::Integer)),
        }
    }
}

impl ColumnField for i32 {
    const COLUMN_TYPE: ColumnType = ColumnType::Integer;

    fn to_column(&self) -> Result<ColumnValue, ColumnError> {
        Ok(ColumnValue::Integer(i64::from(*self)))
    }

    fn from_column(value: ColumnValue) -> Result<Self, ColumnError> {
        let wide = i64::from_column(value)?;
        i32::try_from(wide).map_err(|_| ColumnError::IntegerOverflow(wide))
    }
}

impl ColumnField for f64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Real;

    fn to_column(&self) -> Result<ColumnValue, ColumnError> {
        Ok(match float::non_finite_text(*self) {
            Some(text) => ColumnValue::Text(text.to_string()),
            None => ColumnValue::Real(*self),
        })
    }

    fn from_column(value: ColumnValue) -> Result<Self, ColumnError> {
        match value {
            ColumnValue::Real(f) => Ok(f),
            ColumnValue::Integer(i) => Ok(i as f64),
            ColumnValue::Text(text) => float::parse_non_finite(&text)
                .ok_or_else(|| ColumnError::invalid(text, "not a number")),
            ColumnValue::Null => Err(ColumnError::UnexpectedNull),
            other => Err(other.mismatch(ColumnType::Real)),
        }
    }
}

impl ColumnField for String {
    const COLUMN_TYPE: ColumnType = ColumnType::Text;

    fn to_column(&self) -> Result<ColumnValue, ColumnError> {
        Ok(ColumnValue::Text(self.clone()))
    }

    fn from_column(value: ColumnValue) -> Result<Self, ColumnError> {
        match value {
            ColumnValue::Text(s) => Ok(s),
            ColumnValue::Null => Err(ColumnError::UnexpectedNull),
            other => Err(other.mismatch(ColumnType::Text)),
        }
    }
}

impl ColumnField for Uuid {
    const COLUMN_TYPE: ColumnType = ColumnType::Text;

    fn to_column(&self) -> Result<ColumnValue, ColumnError> {
        Ok(ColumnValue::Text(self.to_string()))
    }

    fn from_column(value: ColumnValue) -> Result<Self, ColumnError> {
        let text = String::from_column(value)?;
        Uuid::parse_str(&text).map_err(|e| ColumnError::invalid(text, e.to_string()))
    }
}

impl ColumnField for DateTime<Utc> {
    const COLUMN_TYPE: ColumnType = ColumnType::Text;

    fn to_column(&self) -> Result<ColumnValue, ColumnError> {
        Ok(ColumnValue::Text(self.to_rfc3339()))
    }

    fn from_column(value: ColumnValue) -> Result<Self, ColumnError> {
        let text = String::from_column(value)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ColumnError::invalid(text, e.to_string()))
    }
}

/// Implements [`ColumnField`] through serde_json for the listed types.
///
/// Used for collections (`ColumnType::List`) and nested value objects
/// (`ColumnType::Json`). The codec is whatever serde derives for the type,
/// so each nested type can evolve on its own.
macro_rules! json_column {
    ($column_type:expr; $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::mapping::ColumnField for $ty {
                const COLUMN_TYPE: $crate::mapping::ColumnType = $column_type;

                fn to_column(
                    &self,
                ) -> Result<$crate::mapping::ColumnValue, $crate::error::ColumnError> {
                    Ok($crate::mapping::ColumnValue::Json(serde_json::to_value(self)?))
                }

                fn from_column(
                    value: $crate::mapping::ColumnValue,
                ) -> Result<Self, $crate::error::ColumnError> {
                    match value {
                        $crate::mapping::ColumnValue::Json(json) => {
                            Ok(serde_json::from_value(json)?)
                        }
                        $crate::mapping::ColumnValue::Text(text) => {
                            Ok(serde_json::from_str(&text)?)
                        }
                        $crate::mapping::ColumnValue::Null => {
                            Err($crate::error::ColumnError::UnexpectedNull)
                        }
                        other => Err($crate::error::ColumnError::TypeMismatch {
                            expected: $column_type,
                            found: other.kind_name(),
                        }),
                    }
                }
            }
        )+
    };
}

pub(crate) use json_column;

json_column!(ColumnType::List; Vec<String>, Vec<i32>);
json_column!(ColumnType::Json; BTreeMap<String, String>);

/// Declares a closed set of names persisted as TEXT.
///
/// Generates the enum, its serde names, `as_str`, `FromStr`, `Display` and
/// the [`ColumnField`] impl. The first variant is the default.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident => $first_text:literal,
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $text:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $(#[$first_meta])*
            #[default]
            #[serde(rename = $first_text)]
            $first,
            $(
                $(#[$variant_meta])*
                #[serde(rename = $text)]
                $variant,
            )*
        }

        impl $name {
            /// Persisted name of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$first => $first_text,
                    $( $name::$variant => $text, )*
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ColumnError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $first_text => Ok($name::$first),
                    $( $text => Ok($name::$variant), )*
                    other => Err($crate::error::ColumnError::invalid(
                        other,
                        concat!("not a ", stringify!($name)),
                    )),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::mapping::ColumnField for $name {
            const COLUMN_TYPE: $crate::mapping::ColumnType =
                $crate::mapping::ColumnType::Text;

            fn to_column(
                &self,
            ) -> Result<$crate::mapping::ColumnValue, $crate::error::ColumnError> {
                Ok($crate::mapping::ColumnValue::Text(self.as_str().to_string()))
            }

            fn from_column(
                value: $crate::mapping::ColumnValue,
            ) -> Result<Self, $crate::error::ColumnError> {
                let text = <String as $crate::mapping::ColumnField>::from_column(value)?;
                text.parse()
            }
        }
    };
}

pub(crate) use text_enum;

// =============================================================================
// Unit Tests
// =============================================================================

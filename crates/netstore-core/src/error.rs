//! # Error Types
//!
//! Error types for netstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  netstore-core errors (this file)                                      │
//! │  ├── ColumnError      - One value failed to convert field ⇄ column      │
//! │  ├── MappingError     - ColumnError tagged with table + column         │
//! │  └── ValidationError  - Invalid caller arguments                       │
//! │                                                                         │
//! │  netstore-db errors (separate crate)                                   │
//! │  └── DbError          - Wraps the above plus backend failures          │
//! │                                                                         │
//! │  Flow: ColumnError → MappingError → DbError → REST layer               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::mapping::ColumnType;

// =============================================================================
// Column Error
// =============================================================================

/// A single value could not be converted between a field and its column.
///
/// Carries no column name: the mapping layer attaches it (see [`MappingError`]).
#[derive(Debug, Error)]
pub enum ColumnError {
    /// The column held NULL but the field is not optional.
    #[error("unexpected NULL")]
    UnexpectedNull,

    /// The column value has the wrong shape for the field.
    #[error("expected {expected} value, found {found}")]
    TypeMismatch {
        expected: ColumnType,
        found: &'static str,
    },

    /// Text that does not parse into the field type (enum names, dates, UUIDs).
    #[error("invalid value '{value}': {reason}")]
    InvalidValue { value: String, reason: String },

    /// Integer that does not fit the field width.
    #[error("integer {0} out of range")]
    IntegerOverflow(i64),

    /// JSON encode/decode of a complex value failed.
    #[error("JSON codec failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ColumnError {
    /// Creates an InvalidValue error.
    pub fn invalid(value: impl Into<String>, reason: impl Into<String>) -> Self {
        ColumnError::InvalidValue {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Mapping Error
// =============================================================================

/// Field ⇄ column conversion failed for a named column.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A value of `table.column` failed to convert.
    #[error("{table}.{column}: {source}")]
    Column {
        table: &'static str,
        column: &'static str,
        #[source]
        source: ColumnError,
    },

    /// A row carried a different number of values than the mapping has columns.
    #[error("{table}: expected {expected} column values, got {actual}")]
    ArityMismatch {
        table: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;

// =============================================================================
// Validation Error
// =============================================================================

/// Caller argument errors.
///
/// Raised synchronously before any backend call. The REST layer maps these
/// to a 4xx response.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Variant 0 is the permanent baseline of every network.
    #[error("the initial variant (variantNum 0) of network {network_uuid} cannot be deleted")]
    InitialVariantNotDeletable { network_uuid: String },

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        value: i64,
    },

    /// Two arguments that must differ are equal.
    #[error("{field} must differ from its source ({value})")]
    SameAsSource { field: String, value: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_error_names_table_and_column() {
        let err = MappingError::Column {
            table: "generator",
            column: "targetP",
            source: ColumnError::UnexpectedNull,
        };
        assert_eq!(err.to_string(), "generator.targetP: unexpected NULL");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ColumnError::TypeMismatch {
            expected: ColumnType::Real,
            found: "text",
        };
        assert_eq!(err.to_string(), "expected REAL value, found text");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::InitialVariantNotDeletable {
            network_uuid: "n".to_string(),
        };
        assert!(err.to_string().contains("cannot be deleted"));
    }
}

//! # Validation Module
//!
//! Argument checks run before any backend call.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: REST layer (external)                                        │
//! │  └── Request shape, deserialization                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository (netstore-db)                                     │
//! │  └── THIS MODULE: variant/id/batch argument rules                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── PRIMARY KEY (networkUuid, variantNum, id)                         │
//! │  └── UNIQUE (uuid, variantId) on the network table                     │
//! │                                                                         │
//! │  Electrical parameters are NOT validated here.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use netstore_core::validation::{validate_deletable_variant, validate_variant_num};
//!
//! assert!(validate_variant_num(3).is_ok());
//! assert!(validate_deletable_variant("net", 0).is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{INITIAL_VARIANT_NUM, MAX_ID_LENGTH};

// =============================================================================
// Variant Validators
// =============================================================================

/// Validates a variant number: non-negative.
pub fn validate_variant_num(variant_num: i32) -> ValidationResult<()> {
    if variant_num < INITIAL_VARIANT_NUM {
        return Err(ValidationError::OutOfRange {
            field: "variantNum".to_string(),
            min: i64::from(INITIAL_VARIANT_NUM),
            max: i64::from(i32::MAX),
            value: i64::from(variant_num),
        });
    }
    Ok(())
}

/// Validates that a variant may be deleted.
///
/// ## Rules
/// - Must be a valid variant number
/// - Must not be the initial variant (0)
///
/// ## Example
/// ```rust
/// use netstore_core::validation::validate_deletable_variant;
///
/// assert!(validate_deletable_variant("net", 1).is_ok());
/// assert!(validate_deletable_variant("net", 0).is_err());
/// ```
pub fn validate_deletable_variant(
    network_uuid: impl std::fmt::Display,
    variant_num: i32,
) -> ValidationResult<()> {
    validate_variant_num(variant_num)?;

    if variant_num == INITIAL_VARIANT_NUM {
        return Err(ValidationError::InitialVariantNotDeletable {
            network_uuid: network_uuid.to_string(),
        });
    }
    Ok(())
}

/// Validates a variant clone: distinct, non-negative source and target.
pub fn validate_clone_variant(source_variant_num: i32, target_variant_num: i32) -> ValidationResult<()> {
    validate_variant_num(source_variant_num)?;
    validate_variant_num(target_variant_num)?;

    if source_variant_num == target_variant_num {
        return Err(ValidationError::SameAsSource {
            field: "targetVariantNum".to_string(),
            value: target_variant_num.to_string(),
        });
    }
    Ok(())
}

/// Validates a whole-network clone request.
///
/// ## Rules
/// - Target network must differ from the source network
/// - At least one variant id must be requested, none of them empty
pub fn validate_clone_network(
    target_network_uuid: impl std::fmt::Display,
    source_network_uuid: impl std::fmt::Display,
    target_variant_ids: &[String],
) -> ValidationResult<()> {
    let target = target_network_uuid.to_string();
    if target == source_network_uuid.to_string() {
        return Err(ValidationError::SameAsSource {
            field: "targetNetworkUuid".to_string(),
            value: target,
        });
    }

    if target_variant_ids.is_empty() {
        return Err(ValidationError::Required {
            field: "targetVariantIds".to_string(),
        });
    }

    for variant_id in target_variant_ids {
        validate_variant_id(variant_id)?;
    }
    Ok(())
}

/// Validates a variant id (the human-readable name of a variant).
pub fn validate_variant_id(variant_id: &str) -> ValidationResult<()> {
    validate_identifier("variantId", variant_id)
}

// =============================================================================
// Resource Validators
// =============================================================================

/// Validates a resource id: non-empty, at most [`MAX_ID_LENGTH`] characters.
///
/// ## Example
/// ```rust
/// use netstore_core::validation::validate_resource_id;
///
/// assert!(validate_resource_id("G1").is_ok());
/// assert!(validate_resource_id("  ").is_err());
/// ```
pub fn validate_resource_id(id: &str) -> ValidationResult<()> {
    validate_identifier("id", id)
}

fn validate_identifier(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ID_LENGTH,
        });
    }
    Ok(())
}

/// Validates a write batch size.
pub fn validate_batch_size(batch_size: usize) -> ValidationResult<()> {
    if batch_size == 0 {
        return Err(ValidationError::OutOfRange {
            field: "batchSize".to_string(),
            min: 1,
            max: i64::MAX,
            value: 0,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_variant_num() {
        assert!(validate_variant_num(0).is_ok());
        assert!(validate_variant_num(42).is_ok());
        assert!(matches!(
            validate_variant_num(-1),
            Err(ValidationError::OutOfRange { value: -1, .. })
        ));
    }

    #[test]
    fn test_initial_variant_is_not_deletable() {
        let err = validate_deletable_variant("abc", 0).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InitialVariantNotDeletable { ref network_uuid } if network_uuid == "abc"
        ));
        assert!(validate_deletable_variant("abc", 1).is_ok());
        assert!(validate_deletable_variant("abc", -3).is_err());
    }

    #[test]
    fn test_validate_clone_variant() {
        assert!(validate_clone_variant(0, 1).is_ok());
        assert!(matches!(
            validate_clone_variant(2, 2),
            Err(ValidationError::SameAsSource { .. })
        ));
        assert!(validate_clone_variant(0, -1).is_err());
    }

    #[test]
    fn test_validate_clone_network() {
        let ids = vec!["InitialState".to_string()];
        assert!(validate_clone_network("b", "a", &ids).is_ok());
        assert!(matches!(
            validate_clone_network("a", "a", &ids),
            Err(ValidationError::SameAsSource { .. })
        ));
        assert!(matches!(
            validate_clone_network("b", "a", &[]),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_clone_network("b", "a", &["".to_string()]).is_err());
    }

    #[test]
    fn test_validate_resource_id() {
        assert!(validate_resource_id("VL1").is_ok());
        assert!(validate_resource_id("").is_err());
        assert!(matches!(
            validate_resource_id(" \t"),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_resource_id(&"x".repeat(MAX_ID_LENGTH)).is_ok());
        assert!(matches!(
            validate_resource_id(&"x".repeat(MAX_ID_LENGTH + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_batch_size() {
        assert!(validate_batch_size(1).is_ok());
        assert!(validate_batch_size(0).is_err());
    }
}

//! # Mapping Registry
//!
//! Associates every attribute type with its [`AttributeMapping`] and every
//! [`ResourceType`] with its [`TableSchema`].
//!
//! Mappings are built lazily, once per process, and shared read-only
//! afterwards (`OnceLock`). Lookup by kind is an exhaustive `match`, so a
//! resource type without a mapping does not compile.

use crate::attributes::*;
use crate::mapping::{AttributeMapping, TableSchema};
use crate::types::ResourceType;

/// An attribute bag with a registered column mapping.
pub trait Attributes: Default + Clone + Send + Sync + 'static {
    /// Kind (and therefore table) this attribute type is stored in.
    const RESOURCE_TYPE: ResourceType;

    /// The column mapping, built on first use.
    fn mapping() -> &'static AttributeMapping<Self>;
}

/// Marker for attribute types stored in an equipment table.
///
/// Only these can go through the generic equipment repository.
pub trait EquipmentAttributes: Attributes {}

/// Column layout of the table storing `kind`.
pub fn schema_for(kind: ResourceType) -> &'static TableSchema {
    match kind {
        ResourceType::Network => NetworkAttributes::mapping().schema(),
        ResourceType::Substation => SubstationAttributes::mapping().schema(),
        ResourceType::VoltageLevel => VoltageLevelAttributes::mapping().schema(),
        ResourceType::Generator => GeneratorAttributes::mapping().schema(),
        ResourceType::Battery => BatteryAttributes::mapping().schema(),
        ResourceType::Load => LoadAttributes::mapping().schema(),
        ResourceType::ShuntCompensator => ShuntCompensatorAttributes::mapping().schema(),
        ResourceType::VscConverterStation => VscConverterStationAttributes::mapping().schema(),
        ResourceType::LccConverterStation => LccConverterStationAttributes::mapping().schema(),
        ResourceType::StaticVarCompensator => StaticVarCompensatorAttributes::mapping().schema(),
        ResourceType::BusbarSection => BusbarSectionAttributes::mapping().schema(),
        ResourceType::Switch => SwitchAttributes::mapping().schema(),
        ResourceType::TwoWindingsTransformer => {
            TwoWindingsTransformerAttributes::mapping().schema()
        }
        ResourceType::ThreeWindingsTransformer => {
            ThreeWindingsTransformerAttributes::mapping().schema()
        }
        ResourceType::Line => LineAttributes::mapping().schema(),
        ResourceType::HvdcLine => HvdcLineAttributes::mapping().schema(),
        ResourceType::DanglingLine => DanglingLineAttributes::mapping().schema(),
        ResourceType::ConfiguredBus => ConfiguredBusAttributes::mapping().schema(),
    }
}

/// Declares the `OnceLock`-backed [`Attributes`] impl for an attribute type.
///
/// ```ignore
/// register_mapping!(LoadAttributes, ResourceType::Load, |builder| {
///     builder.column("p0", |a| &a.p0, |a| &mut a.p0)
/// });
/// ```
macro_rules! register_mapping {
    ($ty:ty, $kind:expr, |$builder:ident| $body:expr) => {
        impl $crate::mapping::Attributes for $ty {
            const RESOURCE_TYPE: $crate::types::ResourceType = $kind;

            fn mapping() -> &'static $crate::mapping::AttributeMapping<Self> {
                static MAPPING: std::sync::OnceLock<$crate::mapping::AttributeMapping<$ty>> =
                    std::sync::OnceLock::new();
                MAPPING.get_or_init(|| {
                    let $builder = $crate::mapping::AttributeMapping::<$ty>::builder($kind);
                    $body.build()
                })
            }
        }
    };
}

pub(crate) use register_mapping;

// =============================================================================
// Unit Tests
// =============================================================================

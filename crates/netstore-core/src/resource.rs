//! # Resources
//!
//! A [`Resource`] is the unit of storage: an id, the variant it belongs to
//! and a typed attribute bag. The network uuid is not part of the resource;
//! every repository call is scoped by it.

use serde::{Deserialize, Serialize};

use crate::attributes::*;
use crate::mapping::Attributes;
use crate::types::ResourceType;

/// One stored piece of equipment (or the network row itself).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource<A> {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub id: String,
    pub variant_num: i32,
    pub attributes: A,
}

impl<A: Attributes> Resource<A> {
    /// Creates a resource of `A`'s kind.
    pub fn new(id: impl Into<String>, variant_num: i32, attributes: A) -> Self {
        Resource {
            resource_type: A::RESOURCE_TYPE,
            id: id.into(),
            variant_num,
            attributes,
        }
    }

    /// Same resource moved to another variant.
    pub fn with_variant(mut self, variant_num: i32) -> Self {
        self.variant_num = variant_num;
        self
    }
}

/// Any equipment resource, tagged with its kind.
///
/// Returned by identifiable lookups that search every equipment table.
/// Serializes as the wrapped resource, whose `type` field names the kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Identifiable {
    Substation(Resource<SubstationAttributes>),
    VoltageLevel(Resource<VoltageLevelAttributes>),
    Generator(Resource<GeneratorAttributes>),
    Battery(Resource<BatteryAttributes>),
    Load(Resource<LoadAttributes>),
    ShuntCompensator(Resource<ShuntCompensatorAttributes>),
    VscConverterStation(Resource<VscConverterStationAttributes>),
    LccConverterStation(Resource<LccConverterStationAttributes>),
    StaticVarCompensator(Resource<StaticVarCompensatorAttributes>),
    BusbarSection(Resource<BusbarSectionAttributes>),
    Switch(Resource<SwitchAttributes>),
    TwoWindingsTransformer(Resource<TwoWindingsTransformerAttributes>),
    ThreeWindingsTransformer(Resource<ThreeWindingsTransformerAttributes>),
    Line(Resource<LineAttributes>),
    HvdcLine(Resource<HvdcLineAttributes>),
    DanglingLine(Resource<DanglingLineAttributes>),
    ConfiguredBus(Resource<ConfiguredBusAttributes>),
}

macro_rules! identifiable_accessors {
    ($($variant:ident => $attributes:ty),+ $(,)?) => {
        impl Identifiable {
            /// Kind of the wrapped resource.
            pub fn resource_type(&self) -> ResourceType {
                match self {
                    $( Identifiable::$variant(r) => r.resource_type, )+
                }
            }

            pub fn id(&self) -> &str {
                match self {
                    $( Identifiable::$variant(r) => &r.id, )+
                }
            }

            pub fn variant_num(&self) -> i32 {
                match self {
                    $( Identifiable::$variant(r) => r.variant_num, )+
                }
            }
        }

        $(
            impl From<Resource<$attributes>> for Identifiable {
                fn from(resource: Resource<$attributes>) -> Self {
                    Identifiable::$variant(resource)
                }
            }
        )+
    };
}

identifiable_accessors! {
    Substation => SubstationAttributes,
    VoltageLevel => VoltageLevelAttributes,
    Generator => GeneratorAttributes,
    Battery => BatteryAttributes,
    Load => LoadAttributes,
    ShuntCompensator => ShuntCompensatorAttributes,
    VscConverterStation => VscConverterStationAttributes,
    LccConverterStation => LccConverterStationAttributes,
    StaticVarCompensator => StaticVarCompensatorAttributes,
    BusbarSection => BusbarSectionAttributes,
    Switch => SwitchAttributes,
    TwoWindingsTransformer => TwoWindingsTransformerAttributes,
    ThreeWindingsTransformer => ThreeWindingsTransformerAttributes,
    Line => LineAttributes,
    HvdcLine => HvdcLineAttributes,
    DanglingLine => DanglingLineAttributes,
    ConfiguredBus => ConfiguredBusAttributes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_takes_kind_from_attributes() {
        let load = Resource::new("L1", 0, LoadAttributes::default());
        assert_eq!(load.resource_type, ResourceType::Load);
        assert_eq!(load.clone().with_variant(4).variant_num, 4);
    }

    #[test]
    fn test_identifiable_accessors() {
        let identifiable: Identifiable = Resource::new(
            "G1",
            2,
            GeneratorAttributes {
                voltage_level_id: "VL1".to_string(),
                ..Default::default()
            },
        )
        .into();

        assert_eq!(identifiable.resource_type(), ResourceType::Generator);
        assert_eq!(identifiable.id(), "G1");
        assert_eq!(identifiable.variant_num(), 2);
    }
}

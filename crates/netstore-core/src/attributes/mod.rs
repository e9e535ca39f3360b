//! # Attribute Types
//!
//! One attribute struct per resource kind, each with its column mapping
//! declared next to it.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Attribute Modules                                │
//! │                                                                         │
//! │  network.rs     NetworkAttributes                                      │
//! │  container.rs   SubstationAttributes, VoltageLevelAttributes           │
//! │  injection.rs   Generator, Battery, Load, ShuntCompensator,            │
//! │                 Vsc/LccConverterStation, StaticVarCompensator          │
//! │  topology.rs    BusbarSection, Switch, ConfiguredBus                   │
//! │  branch.rs      Line, Two/ThreeWindingsTransformer, HvdcLine,          │
//! │                 DanglingLine                                           │
//! │  values.rs      Nested JSON value objects (limits, tap changers, ...)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every equipment struct starts with the same identifiable columns
//! (`name`, `fictitious`, `properties`).

pub mod branch;
pub mod container;
pub mod injection;
pub mod network;
pub mod topology;
pub mod values;

pub use branch::{
    DanglingLineAttributes, HvdcLineAttributes, LineAttributes, ThreeWindingsTransformerAttributes,
    TwoWindingsTransformerAttributes,
};
pub use container::{SubstationAttributes, VoltageLevelAttributes};
pub use injection::{
    BatteryAttributes, GeneratorAttributes, LccConverterStationAttributes, LoadAttributes,
    ShuntCompensatorAttributes, StaticVarCompensatorAttributes, VscConverterStationAttributes,
};
pub use network::{default_variant_id, NetworkAttributes};
pub use topology::{BusbarSectionAttributes, ConfiguredBusAttributes, SwitchAttributes};
pub use values::*;

use crate::mapping::text_enum;

/// Maps the identifiable columns shared by every equipment struct.
macro_rules! identifiable_columns {
    ($builder:expr) => {
        $builder
            .column("name", |a| &a.name, |a| &mut a.name)
            .column("fictitious", |a| &a.fictitious, |a| &mut a.fictitious)
            .column("properties", |a| &a.properties, |a| &mut a.properties)
    };
}

pub(crate) use identifiable_columns;

// =============================================================================
// Enumerations
// =============================================================================

text_enum! {
    /// How a voltage level describes its connectivity.
    pub enum TopologyKind {
        NodeBreaker => "NODE_BREAKER",
        BusBreaker => "BUS_BREAKER",
    }
}

text_enum! {
    pub enum SwitchKind {
        Breaker => "BREAKER",
        Disconnector => "DISCONNECTOR",
        LoadBreakSwitch => "LOAD_BREAK_SWITCH",
    }
}

text_enum! {
    pub enum LoadType {
        Undefined => "UNDEFINED",
        Auxiliary => "AUXILIARY",
        Fictitious => "FICTITIOUS",
    }
}

text_enum! {
    /// Primary energy of a generator.
    pub enum EnergySource {
        Other => "OTHER",
        Hydro => "HYDRO",
        Nuclear => "NUCLEAR",
        Wind => "WIND",
        Thermal => "THERMAL",
        Solar => "SOLAR",
    }
}

text_enum! {
    pub enum StaticVarCompensatorRegulationMode {
        Off => "OFF",
        Voltage => "VOLTAGE",
        ReactivePower => "REACTIVE_POWER",
    }
}

text_enum! {
    /// Direction of power flow between the two converter stations.
    pub enum HvdcConvertersMode {
        SideOneRectifierSideTwoInverter => "SIDE_1_RECTIFIER_SIDE_2_INVERTER",
        SideOneInverterSideTwoRectifier => "SIDE_1_INVERTER_SIDE_2_RECTIFIER",
    }
}

text_enum! {
    pub enum ConnectableDirection {
        Undefined => "UNDEFINED",
        Top => "TOP",
        Bottom => "BOTTOM",
    }
}

text_enum! {
    pub enum PhaseTapChangerRegulationMode {
        FixedTap => "FIXED_TAP",
        CurrentLimiter => "CURRENT_LIMITER",
        ActivePowerControl => "ACTIVE_POWER_CONTROL",
    }
}

text_enum! {
    pub enum CgmesTopologyKind {
        NodeBreaker => "NODE_BREAKER",
        BusBranch => "BUS_BRANCH",
    }
}

//! Branches and other multi-terminal equipment.
//!
//! Lines and transformers hang off one voltage level per side. They are
//! listed by any of their `voltageLevelId<N>` columns and updated by id only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attributes::injection::injection_columns;
use crate::attributes::{
    identifiable_columns, ConnectablePosition, CurrentLimits, DanglingLineGeneration,
    HvdcAngleDroopActivePowerControl, HvdcConvertersMode, HvdcOperatorActivePowerRange,
    LegAttributes, PhaseTapChanger, RatioTapChanger,
};
use crate::mapping::registry::register_mapping;
use crate::mapping::EquipmentAttributes;
use crate::types::ResourceType;

/// Maps the two-side connection and flow columns of lines and two-windings
/// transformers.
macro_rules! two_sides_columns {
    ($builder:expr) => {
        $builder
            .column("voltageLevelId1", |a| &a.voltage_level_id1, |a| &mut a.voltage_level_id1)
            .column("voltageLevelId2", |a| &a.voltage_level_id2, |a| &mut a.voltage_level_id2)
            .column("node1", |a| &a.node1, |a| &mut a.node1)
            .column("node2", |a| &a.node2, |a| &mut a.node2)
            .column("bus1", |a| &a.bus1, |a| &mut a.bus1)
            .column("bus2", |a| &a.bus2, |a| &mut a.bus2)
            .column("connectableBus1", |a| &a.connectable_bus1, |a| &mut a.connectable_bus1)
            .column("connectableBus2", |a| &a.connectable_bus2, |a| &mut a.connectable_bus2)
            .column("p1", |a| &a.p1, |a| &mut a.p1)
            .column("q1", |a| &a.q1, |a| &mut a.q1)
            .column("p2", |a| &a.p2, |a| &mut a.p2)
            .column("q2", |a| &a.q2, |a| &mut a.q2)
            .column("position1", |a| &a.position1, |a| &mut a.position1)
            .column("position2", |a| &a.position2, |a| &mut a.position2)
            .column("currentLimits1", |a| &a.current_limits1, |a| &mut a.current_limits1)
            .column("currentLimits2", |a| &a.current_limits2, |a| &mut a.current_limits2)
            .container(&["voltageLevelId1", "voltageLevelId2"])
    };
}

// =============================================================================
// Line
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAttributes {
    pub voltage_level_id1: String,
    pub voltage_level_id2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node1: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node2: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectable_bus1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectable_bus2: Option<String>,
    pub r: f64,
    pub x: f64,
    pub g1: f64,
    pub b1: f64,
    pub g2: f64,
    pub b2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position1: Option<ConnectablePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position2: Option<ConnectablePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_limits1: Option<CurrentLimits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_limits2: Option<CurrentLimits>,
}

register_mapping!(LineAttributes, ResourceType::Line, |builder| {
    two_sides_columns!(identifiable_columns!(builder))
        .column("r", |a| &a.r, |a| &mut a.r)
        .column("x", |a| &a.x, |a| &mut a.x)
        .column("g1", |a| &a.g1, |a| &mut a.g1)
        .column("b1", |a| &a.b1, |a| &mut a.b1)
        .column("g2", |a| &a.g2, |a| &mut a.g2)
        .column("b2", |a| &a.b2, |a| &mut a.b2)
});

impl EquipmentAttributes for LineAttributes {}

// =============================================================================
// Two Windings Transformer
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoWindingsTransformerAttributes {
    pub voltage_level_id1: String,
    pub voltage_level_id2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node1: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node2: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectable_bus1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectable_bus2: Option<String>,
    pub r: f64,
    pub x: f64,
    pub g: f64,
    pub b: f64,
    pub rated_u1: f64,
    pub rated_u2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position1: Option<ConnectablePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position2: Option<ConnectablePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio_tap_changer: Option<RatioTapChanger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_tap_changer: Option<PhaseTapChanger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_limits1: Option<CurrentLimits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_limits2: Option<CurrentLimits>,
}

register_mapping!(
    TwoWindingsTransformerAttributes,
    ResourceType::TwoWindingsTransformer,
    |builder| {
        two_sides_columns!(identifiable_columns!(builder))
            .column("r", |a| &a.r, |a| &mut a.r)
            .column("x", |a| &a.x, |a| &mut a.x)
            .column("g", |a| &a.g, |a| &mut a.g)
            .column("b", |a| &a.b, |a| &mut a.b)
            .column("ratedU1", |a| &a.rated_u1, |a| &mut a.rated_u1)
            .column("ratedU2", |a| &a.rated_u2, |a| &mut a.rated_u2)
            .column("ratedS", |a| &a.rated_s, |a| &mut a.rated_s)
            .column("ratioTapChanger", |a| &a.ratio_tap_changer, |a| &mut a.ratio_tap_changer)
            .column("phaseTapChanger", |a| &a.phase_tap_changer, |a| &mut a.phase_tap_changer)
    }
);

impl EquipmentAttributes for TwoWindingsTransformerAttributes {}

// =============================================================================
// Three Windings Transformer
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeWindingsTransformerAttributes {
    pub voltage_level_id1: String,
    pub voltage_level_id2: String,
    pub voltage_level_id3: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node1: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node2: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node3: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus3: Option<String>,
    /// Rated voltage at the star point.
    pub rated_u0: f64,
    pub leg1: LegAttributes,
    pub leg2: LegAttributes,
    pub leg3: LegAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position1: Option<ConnectablePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position2: Option<ConnectablePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position3: Option<ConnectablePosition>,
}

register_mapping!(
    ThreeWindingsTransformerAttributes,
    ResourceType::ThreeWindingsTransformer,
    |builder| {
        identifiable_columns!(builder)
            .column("voltageLevelId1", |a| &a.voltage_level_id1, |a| &mut a.voltage_level_id1)
            .column("voltageLevelId2", |a| &a.voltage_level_id2, |a| &mut a.voltage_level_id2)
            .column("voltageLevelId3", |a| &a.voltage_level_id3, |a| &mut a.voltage_level_id3)
            .column("node1", |a| &a.node1, |a| &mut a.node1)
            .column("node2", |a| &a.node2, |a| &mut a.node2)
            .column("node3", |a| &a.node3, |a| &mut a.node3)
            .column("bus1", |a| &a.bus1, |a| &mut a.bus1)
            .column("bus2", |a| &a.bus2, |a| &mut a.bus2)
            .column("bus3", |a| &a.bus3, |a| &mut a.bus3)
            .column("ratedU0", |a| &a.rated_u0, |a| &mut a.rated_u0)
            .column("leg1", |a| &a.leg1, |a| &mut a.leg1)
            .column("leg2", |a| &a.leg2, |a| &mut a.leg2)
            .column("leg3", |a| &a.leg3, |a| &mut a.leg3)
            .column("p1", |a| &a.p1, |a| &mut a.p1)
            .column("q1", |a| &a.q1, |a| &mut a.q1)
            .column("p2", |a| &a.p2, |a| &mut a.p2)
            .column("q2", |a| &a.q2, |a| &mut a.q2)
            .column("p3", |a| &a.p3, |a| &mut a.p3)
            .column("q3", |a| &a.q3, |a| &mut a.q3)
            .column("position1", |a| &a.position1, |a| &mut a.position1)
            .column("position2", |a| &a.position2, |a| &mut a.position2)
            .column("position3", |a| &a.position3, |a| &mut a.position3)
            .container(&["voltageLevelId1", "voltageLevelId2", "voltageLevelId3"])
    }
);

impl EquipmentAttributes for ThreeWindingsTransformerAttributes {}

// =============================================================================
// HVDC Line
// =============================================================================

/// DC link between two converter stations. Not attached to a voltage level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HvdcLineAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    pub r: f64,
    pub nominal_v: f64,
    pub active_power_setpoint: f64,
    pub max_p: f64,
    #[serde(default)]
    pub converters_mode: HvdcConvertersMode,
    pub converter_station_id1: String,
    pub converter_station_id2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_droop: Option<HvdcAngleDroopActivePowerControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_range: Option<HvdcOperatorActivePowerRange>,
}

register_mapping!(HvdcLineAttributes, ResourceType::HvdcLine, |builder| {
    identifiable_columns!(builder)
        .column("r", |a| &a.r, |a| &mut a.r)
        .column("nominalV", |a| &a.nominal_v, |a| &mut a.nominal_v)
        .column("activePowerSetpoint", |a| &a.active_power_setpoint, |a| &mut a.active_power_setpoint)
        .column("maxP", |a| &a.max_p, |a| &mut a.max_p)
        .column("convertersMode", |a| &a.converters_mode, |a| &mut a.converters_mode)
        .column("converterStationId1", |a| &a.converter_station_id1, |a| &mut a.converter_station_id1)
        .column("converterStationId2", |a| &a.converter_station_id2, |a| &mut a.converter_station_id2)
        .column("angleDroop", |a| &a.angle_droop, |a| &mut a.angle_droop)
        .column("operatorRange", |a| &a.operator_range, |a| &mut a.operator_range)
});

impl EquipmentAttributes for HvdcLineAttributes {}

// =============================================================================
// Dangling Line
// =============================================================================

/// Line with one open end, typically a boundary line to a neighbouring grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingLineAttributes {
    pub voltage_level_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectable_bus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ConnectablePosition>,
    pub p0: f64,
    pub q0: f64,
    pub r: f64,
    pub x: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ucte_xnode_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<DanglingLineGeneration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_limits: Option<CurrentLimits>,
}

register_mapping!(DanglingLineAttributes, ResourceType::DanglingLine, |builder| {
    injection_columns!(identifiable_columns!(builder))
        .column("p0", |a| &a.p0, |a| &mut a.p0)
        .column("q0", |a| &a.q0, |a| &mut a.q0)
        .column("r", |a| &a.r, |a| &mut a.r)
        .column("x", |a| &a.x, |a| &mut a.x)
        .column("g", |a| &a.g, |a| &mut a.g)
        .column("b", |a| &a.b, |a| &mut a.b)
        .column("ucteXnodeCode", |a| &a.ucte_xnode_code, |a| &mut a.ucte_xnode_code)
        .column("generation", |a| &a.generation, |a| &mut a.generation)
        .column("currentLimits", |a| &a.current_limits, |a| &mut a.current_limits)
});

impl EquipmentAttributes for DanglingLineAttributes {}

//! Single-terminal equipment attached to one voltage level.
//!
//! All injections share the connection columns mapped by
//! [`injection_columns!`] and are listed/updated by `voltageLevelId`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attributes::{
    identifiable_columns, ActivePowerControl, ConnectablePosition, CoordinatedReactiveControl,
    EnergySource, LoadType, ReactiveLimits, ShuntCompensatorModel,
    StaticVarCompensatorRegulationMode, TerminalRef, VoltagePerReactivePowerControl,
};
use crate::mapping::registry::register_mapping;
use crate::mapping::EquipmentAttributes;
use crate::types::ResourceType;

/// Maps the single-terminal connection columns and declares
/// `voltageLevelId` as container and update key.
macro_rules! injection_columns {
    ($builder:expr) => {
        $builder
            .column("voltageLevelId", |a| &a.voltage_level_id, |a| &mut a.voltage_level_id)
            .column("node", |a| &a.node, |a| &mut a.node)
            .column("bus", |a| &a.bus, |a| &mut a.bus)
            .column("connectableBus", |a| &a.connectable_bus, |a| &mut a.connectable_bus)
            .column("p", |a| &a.p, |a| &mut a.p)
            .column("q", |a| &a.q, |a| &mut a.q)
            .column("position", |a| &a.position, |a| &mut a.position)
            .container(&["voltageLevelId"])
            .update_key("voltageLevelId")
    };
}

pub(crate) use injection_columns;

// =============================================================================
// Generator
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorAttributes {
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
    #[serde(default)]
    pub energy_source: EnergySource,
    pub min_p: f64,
    pub max_p: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated_s: Option<f64>,
    #[serde(default)]
    pub voltage_regulator_on: bool,
    pub target_p: f64,
    #[serde(default)]
    pub target_q: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_v: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactive_limits: Option<ReactiveLimits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_power_control: Option<ActivePowerControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinated_reactive_control: Option<CoordinatedReactiveControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulating_terminal: Option<TerminalRef>,
}

register_mapping!(GeneratorAttributes, ResourceType::Generator, |builder| {
    injection_columns!(identifiable_columns!(builder))
        .column("energySource", |a| &a.energy_source, |a| &mut a.energy_source)
        .column("minP", |a| &a.min_p, |a| &mut a.min_p)
        .column("maxP", |a| &a.max_p, |a| &mut a.max_p)
        .column("ratedS", |a| &a.rated_s, |a| &mut a.rated_s)
        .column("voltageRegulatorOn", |a| &a.voltage_regulator_on, |a| &mut a.voltage_regulator_on)
        .column("targetP", |a| &a.target_p, |a| &mut a.target_p)
        .column("targetQ", |a| &a.target_q, |a| &mut a.target_q)
        .column("targetV", |a| &a.target_v, |a| &mut a.target_v)
        .column("reactiveLimits", |a| &a.reactive_limits, |a| &mut a.reactive_limits)
        .column("activePowerControl", |a| &a.active_power_control, |a| &mut a.active_power_control)
        .column(
            "coordinatedReactiveControl",
            |a| &a.coordinated_reactive_control,
            |a| &mut a.coordinated_reactive_control,
        )
        .column("regulatingTerminal", |a| &a.regulating_terminal, |a| &mut a.regulating_terminal)
});

impl EquipmentAttributes for GeneratorAttributes {}

// =============================================================================
// Battery
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryAttributes {
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
    pub min_p: f64,
    pub max_p: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactive_limits: Option<ReactiveLimits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_power_control: Option<ActivePowerControl>,
}

register_mapping!(BatteryAttributes, ResourceType::Battery, |builder| {
    injection_columns!(identifiable_columns!(builder))
        .column("p0", |a| &a.p0, |a| &mut a.p0)
        .column("q0", |a| &a.q0, |a| &mut a.q0)
        .column("minP", |a| &a.min_p, |a| &mut a.min_p)
        .column("maxP", |a| &a.max_p, |a| &mut a.max_p)
        .column("reactiveLimits", |a| &a.reactive_limits, |a| &mut a.reactive_limits)
        .column("activePowerControl", |a| &a.active_power_control, |a| &mut a.active_power_control)
});

impl EquipmentAttributes for BatteryAttributes {}

// =============================================================================
// Load
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadAttributes {
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
    #[serde(default)]
    pub load_type: LoadType,
    pub p0: f64,
    pub q0: f64,
}

register_mapping!(LoadAttributes, ResourceType::Load, |builder| {
    injection_columns!(identifiable_columns!(builder))
        .column("loadType", |a| &a.load_type, |a| &mut a.load_type)
        .column("p0", |a| &a.p0, |a| &mut a.p0)
        .column("q0", |a| &a.q0, |a| &mut a.q0)
});

impl EquipmentAttributes for LoadAttributes {}

// =============================================================================
// Shunt Compensator
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuntCompensatorAttributes {
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
    pub section_count: i32,
    pub model: ShuntCompensatorModel,
    #[serde(default)]
    pub voltage_regulator_on: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_v: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_deadband: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulating_terminal: Option<TerminalRef>,
}

register_mapping!(ShuntCompensatorAttributes, ResourceType::ShuntCompensator, |builder| {
    injection_columns!(identifiable_columns!(builder))
        .column("sectionCount", |a| &a.section_count, |a| &mut a.section_count)
        .column("model", |a| &a.model, |a| &mut a.model)
        .column("voltageRegulatorOn", |a| &a.voltage_regulator_on, |a| &mut a.voltage_regulator_on)
        .column("targetV", |a| &a.target_v, |a| &mut a.target_v)
        .column("targetDeadband", |a| &a.target_deadband, |a| &mut a.target_deadband)
        .column("regulatingTerminal", |a| &a.regulating_terminal, |a| &mut a.regulating_terminal)
});

impl EquipmentAttributes for ShuntCompensatorAttributes {}

// =============================================================================
// HVDC Converter Stations
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VscConverterStationAttributes {
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
    pub loss_factor: f64,
    #[serde(default)]
    pub voltage_regulator_on: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactive_power_setpoint: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_setpoint: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactive_limits: Option<ReactiveLimits>,
}

register_mapping!(VscConverterStationAttributes, ResourceType::VscConverterStation, |builder| {
    injection_columns!(identifiable_columns!(builder))
        .column("lossFactor", |a| &a.loss_factor, |a| &mut a.loss_factor)
        .column("voltageRegulatorOn", |a| &a.voltage_regulator_on, |a| &mut a.voltage_regulator_on)
        .column(
            "reactivePowerSetpoint",
            |a| &a.reactive_power_setpoint,
            |a| &mut a.reactive_power_setpoint,
        )
        .column("voltageSetpoint", |a| &a.voltage_setpoint, |a| &mut a.voltage_setpoint)
        .column("reactiveLimits", |a| &a.reactive_limits, |a| &mut a.reactive_limits)
});

impl EquipmentAttributes for VscConverterStationAttributes {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LccConverterStationAttributes {
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
    pub loss_factor: f64,
    pub power_factor: f64,
}

register_mapping!(LccConverterStationAttributes, ResourceType::LccConverterStation, |builder| {
    injection_columns!(identifiable_columns!(builder))
        .column("lossFactor", |a| &a.loss_factor, |a| &mut a.loss_factor)
        .column("powerFactor", |a| &a.power_factor, |a| &mut a.power_factor)
});

impl EquipmentAttributes for LccConverterStationAttributes {}

// =============================================================================
// Static Var Compensator
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticVarCompensatorAttributes {
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
    pub bmin: f64,
    pub bmax: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_setpoint: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactive_power_setpoint: Option<f64>,
    #[serde(default)]
    pub regulation_mode: StaticVarCompensatorRegulationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_per_reactive_power_control: Option<VoltagePerReactivePowerControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulating_terminal: Option<TerminalRef>,
}

register_mapping!(StaticVarCompensatorAttributes, ResourceType::StaticVarCompensator, |builder| {
    injection_columns!(identifiable_columns!(builder))
        .column("bmin", |a| &a.bmin, |a| &mut a.bmin)
        .column("bmax", |a| &a.bmax, |a| &mut a.bmax)
        .column("voltageSetpoint", |a| &a.voltage_setpoint, |a| &mut a.voltage_setpoint)
        .column(
            "reactivePowerSetpoint",
            |a| &a.reactive_power_setpoint,
            |a| &mut a.reactive_power_setpoint,
        )
        .column("regulationMode", |a| &a.regulation_mode, |a| &mut a.regulation_mode)
        .column(
            "voltagePerReactivePowerControl",
            |a| &a.voltage_per_reactive_power_control,
            |a| &mut a.voltage_per_reactive_power_control,
        )
        .column("regulatingTerminal", |a| &a.regulating_terminal, |a| &mut a.regulating_terminal)
});

impl EquipmentAttributes for StaticVarCompensatorAttributes {}

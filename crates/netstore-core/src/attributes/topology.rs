//! Topology elements: busbar sections, switches and configured buses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attributes::{identifiable_columns, ConnectablePosition, SwitchKind};
use crate::mapping::registry::register_mapping;
use crate::mapping::EquipmentAttributes;
use crate::types::ResourceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusbarSectionAttributes {
    pub voltage_level_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    pub node: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ConnectablePosition>,
}

register_mapping!(BusbarSectionAttributes, ResourceType::BusbarSection, |builder| {
    identifiable_columns!(builder)
        .column("voltageLevelId", |a| &a.voltage_level_id, |a| &mut a.voltage_level_id)
        .column("node", |a| &a.node, |a| &mut a.node)
        .column("v", |a| &a.v, |a| &mut a.v)
        .column("angle", |a| &a.angle, |a| &mut a.angle)
        .column("position", |a| &a.position, |a| &mut a.position)
        .container(&["voltageLevelId"])
        .update_key("voltageLevelId")
});

impl EquipmentAttributes for BusbarSectionAttributes {}

/// Node-breaker switches use `node1/node2`, bus-breaker ones `bus1/bus2`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchAttributes {
    pub voltage_level_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    pub kind: SwitchKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node1: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node2: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus2: Option<String>,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub retained: bool,
}

register_mapping!(SwitchAttributes, ResourceType::Switch, |builder| {
    identifiable_columns!(builder)
        .column("voltageLevelId", |a| &a.voltage_level_id, |a| &mut a.voltage_level_id)
        .column("kind", |a| &a.kind, |a| &mut a.kind)
        .column("node1", |a| &a.node1, |a| &mut a.node1)
        .column("node2", |a| &a.node2, |a| &mut a.node2)
        .column("bus1", |a| &a.bus1, |a| &mut a.bus1)
        .column("bus2", |a| &a.bus2, |a| &mut a.bus2)
        .column("open", |a| &a.open, |a| &mut a.open)
        .column("retained", |a| &a.retained, |a| &mut a.retained)
        .container(&["voltageLevelId"])
        .update_key("voltageLevelId")
});

impl EquipmentAttributes for SwitchAttributes {}

/// Bus of a bus-breaker voltage level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguredBusAttributes {
    pub voltage_level_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

register_mapping!(ConfiguredBusAttributes, ResourceType::ConfiguredBus, |builder| {
    identifiable_columns!(builder)
        .column("voltageLevelId", |a| &a.voltage_level_id, |a| &mut a.voltage_level_id)
        .column("v", |a| &a.v, |a| &mut a.v)
        .column("angle", |a| &a.angle, |a| &mut a.angle)
        .container(&["voltageLevelId"])
        .update_key("voltageLevelId")
});

impl EquipmentAttributes for ConfiguredBusAttributes {}

//! Container equipment: substations and voltage levels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attributes::{identifiable_columns, InternalConnection, TerminalRef, TopologyKind};
use crate::mapping::registry::register_mapping;
use crate::mapping::EquipmentAttributes;
use crate::types::ResourceType;

// =============================================================================
// Substation
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstationAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// ISO 3166 alpha-2 code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tso: Option<String>,
    #[serde(default)]
    pub geographical_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entsoe_area: Option<String>,
}

register_mapping!(SubstationAttributes, ResourceType::Substation, |builder| {
    identifiable_columns!(builder)
        .column("country", |a| &a.country, |a| &mut a.country)
        .column("tso", |a| &a.tso, |a| &mut a.tso)
        .column("geographicalTags", |a| &a.geographical_tags, |a| &mut a.geographical_tags)
        .column("entsoeArea", |a| &a.entsoe_area, |a| &mut a.entsoe_area)
});

impl EquipmentAttributes for SubstationAttributes {}

// =============================================================================
// Voltage Level
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltageLevelAttributes {
    pub substation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    pub nominal_v: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_voltage_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_voltage_limit: Option<f64>,
    #[serde(default)]
    pub topology_kind: TopologyKind,
    #[serde(default)]
    pub internal_connections: Vec<InternalConnection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_terminal: Option<TerminalRef>,
}

register_mapping!(VoltageLevelAttributes, ResourceType::VoltageLevel, |builder| {
    identifiable_columns!(builder)
        .column("substationId", |a| &a.substation_id, |a| &mut a.substation_id)
        .column("nominalV", |a| &a.nominal_v, |a| &mut a.nominal_v)
        .column("lowVoltageLimit", |a| &a.low_voltage_limit, |a| &mut a.low_voltage_limit)
        .column("highVoltageLimit", |a| &a.high_voltage_limit, |a| &mut a.high_voltage_limit)
        .column("topologyKind", |a| &a.topology_kind, |a| &mut a.topology_kind)
        .column(
            "internalConnections",
            |a| &a.internal_connections,
            |a| &mut a.internal_connections,
        )
        .column("slackTerminal", |a| &a.slack_terminal, |a| &mut a.slack_terminal)
        .container(&["substationId"])
        .update_key("substationId")
});

impl EquipmentAttributes for VoltageLevelAttributes {}

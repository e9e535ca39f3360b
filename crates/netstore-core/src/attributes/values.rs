//! Nested value objects stored as JSON columns.
//!
//! These types are opaque to the storage engine: it only needs them to
//! round-trip through serde_json. Field names follow the camelCase wire
//! format shared with the REST layer.

use serde::{Deserialize, Serialize};

use crate::attributes::{CgmesTopologyKind, ConnectableDirection, PhaseTapChangerRegulationMode};
use crate::mapping::{float, json_column, ColumnType};

// =============================================================================
// Connectivity
// =============================================================================

/// Feeder position of a connectable in its voltage level diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectablePosition {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    pub direction: ConnectableDirection,
}

/// Reference to the terminal of another connectable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalRef {
    pub connectable_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

/// Direct node-to-node connection inside a node-breaker voltage level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalConnection {
    pub node1: i32,
    pub node2: i32,
}

// =============================================================================
// Reactive Limits & Controls
// =============================================================================

/// One point of a reactive capability curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactiveCapabilityCurvePoint {
    #[serde(with = "float")]
    pub p: f64,
    #[serde(with = "float")]
    pub min_q: f64,
    #[serde(with = "float")]
    pub max_q: f64,
}

/// Reactive power limits of a generator-like injection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactiveLimits {
    #[serde(rename_all = "camelCase")]
    MinMax {
        #[serde(with = "float")]
        min_q: f64,
        #[serde(with = "float")]
        max_q: f64,
    },
    Curve { points: Vec<ReactiveCapabilityCurvePoint> },
}

/// Participation in active power balancing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePowerControl {
    pub participate: bool,
    #[serde(with = "float")]
    pub droop: f64,
}

/// Share of reactive power in a coordinated voltage control scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatedReactiveControl {
    #[serde(with = "float")]
    pub q_percent: f64,
}

/// Slope of a static var compensator voltage-per-reactive-power control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltagePerReactivePowerControl {
    #[serde(with = "float")]
    pub slope: f64,
}

// =============================================================================
// Limits
// =============================================================================

/// Temporary current limit with its acceptable duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryLimit {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "float::option")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptable_duration: Option<i32>,
    #[serde(default)]
    pub fictitious: bool,
}

/// Permanent limit plus ordered temporary limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentLimits {
    #[serde(with = "float")]
    pub permanent_limit: f64,
    #[serde(default)]
    pub temporary_limits: Vec<TemporaryLimit>,
}

// =============================================================================
// Tap Changers
// =============================================================================

/// One tap position. `alpha` is only meaningful for phase tap changers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TapChangerStep {
    #[serde(with = "float")]
    pub rho: f64,
    #[serde(with = "float")]
    pub r: f64,
    #[serde(with = "float")]
    pub x: f64,
    #[serde(with = "float")]
    pub g: f64,
    #[serde(with = "float")]
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "float::option")]
    pub alpha: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioTapChanger {
    pub low_tap_position: i32,
    pub tap_position: i32,
    pub steps: Vec<TapChangerStep>,
    pub load_tap_changing_capabilities: bool,
    pub regulating: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "float::option")]
    pub target_v: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "float::option")]
    pub target_deadband: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulating_terminal: Option<TerminalRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTapChanger {
    pub low_tap_position: i32,
    pub tap_position: i32,
    pub steps: Vec<TapChangerStep>,
    pub regulation_mode: PhaseTapChangerRegulationMode,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "float::option")]
    pub regulation_value: Option<f64>,
    pub regulating: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "float::option")]
    pub target_deadband: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulating_terminal: Option<TerminalRef>,
}

// =============================================================================
// Equipment-specific Values
// =============================================================================

/// Electrical data of one leg of a three-windings transformer.
///
/// Connection data (voltage level, node, bus) is mapped on the transformer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegAttributes {
    #[serde(with = "float")]
    pub r: f64,
    #[serde(with = "float")]
    pub x: f64,
    #[serde(with = "float")]
    pub g: f64,
    #[serde(with = "float")]
    pub b: f64,
    #[serde(with = "float")]
    pub rated_u: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "float::option")]
    pub rated_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio_tap_changer: Option<RatioTapChanger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_tap_changer: Option<PhaseTapChanger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_limits: Option<CurrentLimits>,
}

/// Conductance/susceptance of one non-linear shunt section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuntCompensatorSection {
    #[serde(with = "float")]
    pub b: f64,
    #[serde(with = "float")]
    pub g: f64,
}

/// Section model of a shunt compensator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShuntCompensatorModel {
    #[serde(rename_all = "camelCase")]
    Linear {
        #[serde(with = "float")]
        b_per_section: f64,
        #[serde(default, skip_serializing_if = "Option::is_none", with = "float::option")]
        g_per_section: Option<f64>,
        maximum_section_count: i32,
    },
    NonLinear { sections: Vec<ShuntCompensatorSection> },
}

impl Default for ShuntCompensatorModel {
    fn default() -> Self {
        ShuntCompensatorModel::Linear {
            b_per_section: 0.0,
            g_per_section: None,
            maximum_section_count: 0,
        }
    }
}

/// Generation part of a dangling line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingLineGeneration {
    #[serde(with = "float")]
    pub min_p: f64,
    #[serde(with = "float")]
    pub max_p: f64,
    #[serde(with = "float")]
    pub target_p: f64,
    #[serde(with = "float")]
    pub target_q: f64,
    #[serde(with = "float")]
    pub target_v: f64,
    pub voltage_regulation_on: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactive_limits: Option<ReactiveLimits>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HvdcAngleDroopActivePowerControl {
    #[serde(with = "float")]
    pub p0: f64,
    #[serde(with = "float")]
    pub droop: f64,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HvdcOperatorActivePowerRange {
    #[serde(with = "float")]
    pub opr_from_cs1_to_cs2: f64,
    #[serde(with = "float")]
    pub opr_from_cs2_to_cs1: f64,
}

// =============================================================================
// CGMES Metadata (network level)
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CgmesSvMetadata {
    pub description: String,
    pub sv_version: i32,
    pub dependencies: Vec<String>,
    pub modeling_authority_set: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CgmesSshMetadata {
    pub description: String,
    pub ssh_version: i32,
    pub dependencies: Vec<String>,
    pub modeling_authority_set: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CimCharacteristics {
    pub topology_kind: CgmesTopologyKind,
    pub cim_version: i32,
}

json_column!(
    ColumnType::Json;
    ConnectablePosition,
    TerminalRef,
    Vec<InternalConnection>,
    ReactiveLimits,
    ActivePowerControl,
    CoordinatedReactiveControl,
    VoltagePerReactivePowerControl,
    CurrentLimits,
    RatioTapChanger,
    PhaseTapChanger,
    LegAttributes,
    ShuntCompensatorModel,
    DanglingLineGeneration,
    HvdcAngleDroopActivePowerControl,
    HvdcOperatorActivePowerRange,
    CgmesSvMetadata,
    CgmesSshMetadata,
    CimCharacteristics,
);

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{ColumnField, ColumnValue};

    #[test]
    fn test_reactive_limits_wire_format() {
        let limits = ReactiveLimits::MinMax {
            min_q: -50.0,
            max_q: 60.0,
        };
        let json = serde_json::to_value(&limits).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "MIN_MAX", "minQ": -50.0, "maxQ": 60.0}));
    }

    #[test]
    fn test_nested_value_survives_json_text() {
        let limits = CurrentLimits {
            permanent_limit: 700.0,
            temporary_limits: vec![TemporaryLimit {
                name: "IT10".to_string(),
                value: Some(800.0),
                acceptable_duration: Some(600),
                fictitious: false,
            }],
        };

        let ColumnValue::Json(json) = limits.to_column().unwrap() else {
            panic!("expected JSON column value");
        };
        let text = serde_json::to_string(&json).unwrap();
        let back = CurrentLimits::from_column(ColumnValue::Text(text)).unwrap();
        assert_eq!(back, limits);
    }

    #[test]
    fn test_non_finite_values_survive_json_text() {
        let generation = DanglingLineGeneration {
            target_v: f64::NAN,
            max_p: f64::INFINITY,
            reactive_limits: Some(ReactiveLimits::MinMax {
                min_q: f64::NEG_INFINITY,
                max_q: 10.0,
            }),
            ..Default::default()
        };

        let ColumnValue::Json(json) = generation.to_column().unwrap() else {
            panic!("expected JSON column value");
        };
        assert_eq!(json["targetV"], "NaN");
        let text = serde_json::to_string(&json).unwrap();
        let back = DanglingLineGeneration::from_column(ColumnValue::Text(text)).unwrap();

        assert!(back.target_v.is_nan());
        assert_eq!(back.max_p, f64::INFINITY);
        assert_eq!(
            back.reactive_limits,
            Some(ReactiveLimits::MinMax {
                min_q: f64::NEG_INFINITY,
                max_q: 10.0,
            })
        );
    }

    #[test]
    fn test_shunt_model_default_is_linear() {
        assert!(matches!(
            ShuntCompensatorModel::default(),
            ShuntCompensatorModel::Linear { .. }
        ));
        assert_eq!(ShuntCompensatorModel::COLUMN_TYPE, ColumnType::Json);
    }
}

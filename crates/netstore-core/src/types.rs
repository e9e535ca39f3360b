//! # Domain Types
//!
//! Resource kinds, table layouts and the small info records returned by
//! network-level listings.
//!
//! ## Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Persisted Layout                                │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │ network                  │      │ <equipment table> (x17)  │        │
//! │  │ ──────────────────────── │      │ ──────────────────────── │        │
//! │  │ uuid        (key)        │      │ networkUuid (key)        │        │
//! │  │ variantNum  (key)        │      │ variantNum  (key)        │        │
//! │  │ variantId   (unique/net) │      │ id          (key)        │        │
//! │  │ id          (name)       │      │ mapped columns ...       │        │
//! │  │ mapped columns ...       │      │                          │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! │                                                                         │
//! │  Referential integrity between tables is NOT enforced.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Resource Type
// =============================================================================

/// Kind of a stored resource. One table per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Network,
    Substation,
    VoltageLevel,
    Generator,
    Battery,
    Load,
    ShuntCompensator,
    VscConverterStation,
    LccConverterStation,
    StaticVarCompensator,
    BusbarSection,
    Switch,
    TwoWindingsTransformer,
    ThreeWindingsTransformer,
    Line,
    HvdcLine,
    DanglingLine,
    ConfiguredBus,
}

impl ResourceType {
    /// Equipment kinds in the fixed table order used by every multi-table
    /// operation (delete, clone, identifiable lookup).
    pub const EQUIPMENT: [ResourceType; 17] = [
        ResourceType::Substation,
        ResourceType::VoltageLevel,
        ResourceType::Generator,
        ResourceType::Battery,
        ResourceType::Load,
        ResourceType::ShuntCompensator,
        ResourceType::VscConverterStation,
        ResourceType::LccConverterStation,
        ResourceType::StaticVarCompensator,
        ResourceType::BusbarSection,
        ResourceType::Switch,
        ResourceType::TwoWindingsTransformer,
        ResourceType::ThreeWindingsTransformer,
        ResourceType::Line,
        ResourceType::HvdcLine,
        ResourceType::DanglingLine,
        ResourceType::ConfiguredBus,
    ];

    /// Network table first, then the equipment tables.
    pub const ALL: [ResourceType; 18] = [
        ResourceType::Network,
        ResourceType::Substation,
        ResourceType::VoltageLevel,
        ResourceType::Generator,
        ResourceType::Battery,
        ResourceType::Load,
        ResourceType::ShuntCompensator,
        ResourceType::VscConverterStation,
        ResourceType::LccConverterStation,
        ResourceType::StaticVarCompensator,
        ResourceType::BusbarSection,
        ResourceType::Switch,
        ResourceType::TwoWindingsTransformer,
        ResourceType::ThreeWindingsTransformer,
        ResourceType::Line,
        ResourceType::HvdcLine,
        ResourceType::DanglingLine,
        ResourceType::ConfiguredBus,
    ];

    /// Name of the table storing this kind.
    pub const fn table_name(&self) -> &'static str {
        match self {
            ResourceType::Network => "network",
            ResourceType::Substation => "substation",
            ResourceType::VoltageLevel => "voltageLevel",
            ResourceType::Generator => "generator",
            ResourceType::Battery => "battery",
            ResourceType::Load => "load",
            ResourceType::ShuntCompensator => "shuntCompensator",
            ResourceType::VscConverterStation => "vscConverterStation",
            ResourceType::LccConverterStation => "lccConverterStation",
            ResourceType::StaticVarCompensator => "staticVarCompensator",
            ResourceType::BusbarSection => "busbarSection",
            ResourceType::Switch => "switch",
            ResourceType::TwoWindingsTransformer => "twoWindingsTransformer",
            ResourceType::ThreeWindingsTransformer => "threeWindingsTransformer",
            ResourceType::Line => "line",
            ResourceType::HvdcLine => "hvdcLine",
            ResourceType::DanglingLine => "danglingLine",
            ResourceType::ConfiguredBus => "configuredBus",
        }
    }

    /// Key layout of this kind's table.
    pub const fn layout(&self) -> TableLayout {
        match self {
            ResourceType::Network => TableLayout::network(),
            other => TableLayout::equipment(other.table_name()),
        }
    }

    #[inline]
    pub fn is_network(&self) -> bool {
        matches!(self, ResourceType::Network)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

// =============================================================================
// Table Layout
// =============================================================================

const NETWORK_FIXED_COLUMNS: &[&str] = &["uuid", "variantNum", "variantId", "id"];
const EQUIPMENT_FIXED_COLUMNS: &[&str] = &["networkUuid", "variantNum", "id"];

/// Fixed (non-mapped) columns of a table.
///
/// Equipment tables are keyed by `(networkUuid, variantNum, id)`. The network
/// table is keyed by `(uuid, variantNum)`, carries the variant id, and stores
/// the network's display id as a plain column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub table: &'static str,
    /// `uuid` for the network table, `networkUuid` elsewhere.
    pub network_column: &'static str,
    /// `Some("variantId")` for the network table only.
    pub variant_id_column: Option<&'static str>,
}

impl TableLayout {
    pub const fn network() -> Self {
        TableLayout {
            table: "network",
            network_column: "uuid",
            variant_id_column: Some("variantId"),
        }
    }

    pub const fn equipment(table: &'static str) -> Self {
        TableLayout {
            table,
            network_column: "networkUuid",
            variant_id_column: None,
        }
    }

    #[inline]
    pub const fn is_network(&self) -> bool {
        self.variant_id_column.is_some()
    }

    /// Key and bookkeeping columns, which mapped columns must never reuse.
    pub const fn fixed_columns(&self) -> &'static [&'static str] {
        if self.is_network() {
            NETWORK_FIXED_COLUMNS
        } else {
            EQUIPMENT_FIXED_COLUMNS
        }
    }
}

// =============================================================================
// Info Records
// =============================================================================

/// `(variantId, variantNum)` pair of one network variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantInfos {
    pub id: String,
    pub num: i32,
}

/// `(uuid, id)` pair identifying one stored network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkInfos {
    pub uuid: Uuid,
    pub id: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equipment_list_excludes_network() {
        assert!(!ResourceType::EQUIPMENT.contains(&ResourceType::Network));
        assert_eq!(ResourceType::ALL[0], ResourceType::Network);
        assert_eq!(&ResourceType::ALL[1..], &ResourceType::EQUIPMENT[..]);
    }

    #[test]
    fn test_table_names_are_unique() {
        let names: HashSet<_> = ResourceType::ALL.iter().map(|t| t.table_name()).collect();
        assert_eq!(names.len(), ResourceType::ALL.len());
    }

    #[test]
    fn test_layouts() {
        let network = ResourceType::Network.layout();
        assert!(network.is_network());
        assert_eq!(network.network_column, "uuid");
        assert!(network.fixed_columns().contains(&"variantId"));

        let line = ResourceType::Line.layout();
        assert!(!line.is_network());
        assert_eq!(line.table, "line");
        assert_eq!(line.fixed_columns(), &["networkUuid", "variantNum", "id"]);
    }

    #[test]
    fn test_resource_type_serde_name() {
        let json = serde_json::to_string(&ResourceType::TwoWindingsTransformer).unwrap();
        assert_eq!(json, "\"TWO_WINDINGS_TRANSFORMER\"");
    }
}

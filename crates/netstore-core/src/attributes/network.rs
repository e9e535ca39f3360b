//! Network-level attributes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attributes::{CgmesSshMetadata, CgmesSvMetadata, CimCharacteristics};
use crate::mapping::registry::register_mapping;
use crate::types::ResourceType;
use crate::{INITIAL_VARIANT_ID, INITIAL_VARIANT_NUM};

/// Attributes of the network row of one variant.
///
/// `uuid` and `variant_id` live in the network table's key columns rather
/// than in mapped columns; the network repository fills them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAttributes {
    pub uuid: Uuid,
    #[serde(default)]
    pub variant_id: String,
    #[serde(default)]
    pub fictitious: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    pub source_format: String,
    pub case_date: DateTime<Utc>,
    #[serde(default)]
    pub forecast_distance: i32,
    #[serde(default)]
    pub connected_components_valid: bool,
    #[serde(default)]
    pub synchronous_components_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgmes_sv_metadata: Option<CgmesSvMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgmes_ssh_metadata: Option<CgmesSshMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cim_characteristics: Option<CimCharacteristics>,
}

impl NetworkAttributes {
    /// Creates attributes for a network with the given identity.
    pub fn new(uuid: Uuid, source_format: impl Into<String>, case_date: DateTime<Utc>) -> Self {
        NetworkAttributes {
            uuid,
            source_format: source_format.into(),
            case_date,
            ..Default::default()
        }
    }

    /// Variant id to store for `variant_num`: the caller's, else a default.
    ///
    /// Variant 0 defaults to `InitialState`, any other to a fresh UUID token.
    pub fn effective_variant_id(&self, variant_num: i32) -> String {
        if self.variant_id.is_empty() {
            default_variant_id(variant_num)
        } else {
            self.variant_id.clone()
        }
    }
}

/// Variant id used when none is supplied for `variant_num`.
pub fn default_variant_id(variant_num: i32) -> String {
    if variant_num == INITIAL_VARIANT_NUM {
        INITIAL_VARIANT_ID.to_string()
    } else {
        Uuid::new_v4().to_string()
    }
}

register_mapping!(NetworkAttributes, ResourceType::Network, |builder| {
    builder
        .column("fictitious", |a| &a.fictitious, |a| &mut a.fictitious)
        .column("properties", |a| &a.properties, |a| &mut a.properties)
        .column("sourceFormat", |a| &a.source_format, |a| &mut a.source_format)
        .column("caseDate", |a| &a.case_date, |a| &mut a.case_date)
        .column("forecastDistance", |a| &a.forecast_distance, |a| &mut a.forecast_distance)
        .column(
            "connectedComponentsValid",
            |a| &a.connected_components_valid,
            |a| &mut a.connected_components_valid,
        )
        .column(
            "synchronousComponentsValid",
            |a| &a.synchronous_components_valid,
            |a| &mut a.synchronous_components_valid,
        )
        .column("cgmesSvMetadata", |a| &a.cgmes_sv_metadata, |a| &mut a.cgmes_sv_metadata)
        .column("cgmesSshMetadata", |a| &a.cgmes_ssh_metadata, |a| &mut a.cgmes_ssh_metadata)
        .column(
            "cimCharacteristics",
            |a| &a.cim_characteristics,
            |a| &mut a.cim_characteristics,
        )
});

//! Wire models for the governance platform API.

use serde::{Deserialize, Serialize};

/// One raw column as returned by the data-source field listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawField {
    pub name: String,
    /// Raw column type descriptor, e.g. `"varchar(255)"` or `"decimal(10,2)"`
    #[serde(rename = "type")]
    pub raw_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Data-source identity for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseDetails {
    pub name: String,
    #[serde(rename = "type")]
    pub database_type: String,
    #[serde(default)]
    pub info_system_name: Option<String>,
}

/// Per-field entry of a type-translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMapField {
    pub index: u32,
    pub source_type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_digits: Option<u32>,
}

/// Request for translating a field list between two engine type systems
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMapRequest {
    pub source_engine: String,
    pub target_engine: String,
    pub fields: Vec<TypeMapField>,
}

/// Per-field entry of a type-translation response. `target_type_name` is
/// absent when the target engine has no valid type for the source type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMapEntry {
    pub index: u32,
    #[serde(default)]
    pub target_type_name: Option<String>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub decimal_digits: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeMapResponse {
    #[serde(rename = "type")]
    pub entries: Vec<TypeMapEntry>,
}

/// Result of a name-uniqueness check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameCheck {
    pub repeat: bool,
}

/// A field as persisted with a sync model. Carries no view-local state
/// beyond the `unmapped` flag, which is part of the mapping itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unmapped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_type: Option<String>,
}

/// One table endpoint of a persisted sync model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedTable {
    pub name: String,
    pub datasource_id: String,
    pub database_type: String,
    pub fields: Vec<PersistedField>,
}

/// Persisted sync model as returned by the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncModelDetail {
    pub id: String,
    pub source: PersistedTable,
    pub target: PersistedTable,
}

/// Create/update payload for a sync model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncModelPayload {
    pub source: PersistedTable,
    pub target: PersistedTable,
}

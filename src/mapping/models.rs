//! Data models for the field-mapping editor

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::api::models::{PersistedField, RawField};

use super::typemap::parse_type_descriptor;

/// Fixed page size of the field lists
pub const PAGE_SIZE: usize = 10;

/// Type name assigned when the target engine has no valid translation
pub const UNDEFINED_TYPE: &str = "undefined";

/// Maximum length of a field description
pub const DESCRIPTION_MAX: usize = 255;

static FIELD_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid field name regex"));

/// Which table endpoint of the mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Source,
    Target,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }

    pub fn other(&self) -> Side {
        match self {
            Side::Source => Side::Target,
            Side::Target => Side::Source,
        }
    }
}

/// Paging direction for the field lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Prev,
    Next,
}

/// One column of either table.
///
/// `index_id` is the stable positional identifier assigned when the field
/// list is loaded or configured; the field with `index_id = k` on the source
/// side corresponds to the field with `index_id = k` on the target side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub index_id: u32,
    pub name: String,
    pub type_name: String,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub description: String,
    /// True when no connection exists or no valid target type was found
    pub unmapped: bool,
    /// Same type translated into the virtual query engine, for search/display
    pub virtual_type: Option<String>,
}

impl Field {
    /// Build a source-side field from a raw column listing entry
    pub fn from_raw(index_id: u32, raw: &RawField) -> Self {
        let parsed = parse_type_descriptor(&raw.raw_type);
        Self {
            index_id,
            name: raw.name.clone(),
            type_name: parsed.type_name,
            length: parsed.length,
            precision: parsed.precision,
            description: raw.description.clone().unwrap_or_default(),
            unmapped: false,
            virtual_type: None,
        }
    }

    pub fn from_persisted(index_id: u32, persisted: &PersistedField) -> Self {
        Self {
            index_id,
            name: persisted.name.clone(),
            type_name: persisted.type_name.clone(),
            length: persisted.length,
            precision: persisted.precision,
            description: persisted.description.clone(),
            unmapped: persisted.unmapped,
            virtual_type: persisted.virtual_type.clone(),
        }
    }

    /// Persisted form of this field; `index_id` is view-local and dropped
    pub fn to_persisted(&self) -> PersistedField {
        PersistedField {
            name: self.name.clone(),
            type_name: self.type_name.clone(),
            length: self.length,
            precision: self.precision,
            description: self.description.clone(),
            unmapped: self.unmapped,
            virtual_type: self.virtual_type.clone(),
        }
    }

    /// Untranslatable fields cannot take part in a connection
    pub fn is_connectable(&self) -> bool {
        self.type_name != UNDEFINED_TYPE
    }
}

/// Table identity shown on a node header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInfo {
    pub name: String,
    pub datasource_id: String,
    /// Database engine type of the owning data source, e.g. `"mysql"`
    pub database_type: String,
}

/// One of the two table endpoints of the mapping editor
#[derive(Debug, Clone, Default)]
pub struct TableNode {
    pub form_info: Option<FormInfo>,
    /// Insertion order is the positional pairing order
    pub items: Vec<Field>,
    /// Current page, 0-based
    pub offset: usize,
    /// Search filter, empty means no filter
    pub keyword: String,
    /// Field selected on this side
    pub single_selected: Option<u32>,
    /// Field highlighted because its counterpart is selected on the other side
    pub related_selected: Option<u32>,
    /// False once the model has been published
    pub edit_status: bool,
    /// True when the table configuration itself is invalid
    pub form_error_status: bool,
}

impl TableNode {
    pub fn new() -> Self {
        Self {
            edit_status: true,
            ..Default::default()
        }
    }

    /// Clear table identity and fields, keeping the node editable
    pub fn reset(&mut self) {
        self.form_info = None;
        self.items.clear();
        self.offset = 0;
        self.keyword.clear();
        self.single_selected = None;
        self.related_selected = None;
        self.edit_status = true;
        self.form_error_status = false;
    }

    pub fn field(&self, index_id: u32) -> Option<&Field> {
        self.items.iter().find(|f| f.index_id == index_id)
    }

    pub fn field_mut(&mut self, index_id: u32) -> Option<&mut Field> {
        self.items.iter_mut().find(|f| f.index_id == index_id)
    }

    /// Engine type of the configured data source, if any
    pub fn engine(&self) -> Option<&str> {
        self.form_info.as_ref().map(|info| info.database_type.as_str())
    }
}

/// Validation classification of a target field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStatus {
    Ok,
    /// Must start with a letter, followed by letters, digits or underscores
    InvalidCharacters,
    /// Name is used by another field in the same list
    DuplicateName,
}

impl NameStatus {
    pub fn message(&self) -> &'static str {
        match self {
            NameStatus::Ok => "",
            NameStatus::InvalidCharacters => {
                "field name must start with a letter and contain only letters, digits and underscores"
            }
            NameStatus::DuplicateName => "field name is already in use",
        }
    }
}

/// Classify every target field name: pattern first, then uniqueness.
/// Both fields of a duplicated name are flagged until one is renamed.
pub fn target_name_statuses(items: &[Field]) -> HashMap<u32, NameStatus> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for field in items {
        *counts.entry(field.name.as_str()).or_default() += 1;
    }

    items
        .iter()
        .map(|field| {
            let status = if !FIELD_NAME_RE.is_match(&field.name) {
                NameStatus::InvalidCharacters
            } else if counts[field.name.as_str()] > 1 {
                NameStatus::DuplicateName
            } else {
                NameStatus::Ok
            };
            (field.index_id, status)
        })
        .collect()
}

/// Empty list states are rendered with different messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The table has no fields configured at all
    NoFieldsConfigured,
    /// Fields exist but none match the current search
    NoSearchMatches,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoFieldsConfigured => "no fields configured",
            EmptyState::NoSearchMatches => "no fields match the search",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(index_id: u32, name: &str) -> Field {
        Field {
            index_id,
            name: name.to_string(),
            type_name: "varchar".to_string(),
            length: Some(255),
            precision: None,
            description: String::new(),
            unmapped: false,
            virtual_type: None,
        }
    }

    #[test]
    fn name_must_start_with_letter() {
        let statuses = target_name_statuses(&[named(0, "1abc")]);
        assert_eq!(statuses[&0], NameStatus::InvalidCharacters);
    }

    #[test]
    fn letters_digits_underscore_accepted() {
        let statuses = target_name_statuses(&[named(0, "abc_2")]);
        assert_eq!(statuses[&0], NameStatus::Ok);
    }

    #[test]
    fn rejects_embedded_punctuation() {
        let statuses = target_name_statuses(&[named(0, "a-b"), named(1, "a b"), named(2, "_a")]);
        assert_eq!(statuses[&0], NameStatus::InvalidCharacters);
        assert_eq!(statuses[&1], NameStatus::InvalidCharacters);
        assert_eq!(statuses[&2], NameStatus::InvalidCharacters);
    }

    #[test]
    fn both_duplicates_flagged_until_renamed() {
        let statuses = target_name_statuses(&[named(0, "uid"), named(1, "uid")]);
        assert_eq!(statuses[&0], NameStatus::DuplicateName);
        assert_eq!(statuses[&1], NameStatus::DuplicateName);

        let statuses = target_name_statuses(&[named(0, "uid"), named(1, "uid2")]);
        assert_eq!(statuses[&0], NameStatus::Ok);
        assert_eq!(statuses[&1], NameStatus::Ok);
    }
}

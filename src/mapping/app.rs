//! The synchronization model container.
//!
//! Owns the two table nodes, the port layout and the edge manager, and
//! exposes the load/reset/serialize contract to the surrounding page. All
//! mutation goes through [`State::update`]; every handler ends with
//! [`State::recompute`], which rebuilds ports for the visible pages and
//! reconciles the edge set.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt;

use crate::api::models::{PersistedTable, SyncModelPayload};
use crate::api::CatalogService;
use crate::resource::Resource;

use super::edges::EdgeManager;
use super::models::{
    target_name_statuses, EmptyState, Field, FormInfo, NameStatus, Side, TableNode,
};
use super::ports::PortLayout;
use super::visibility::{empty_state, has_next, has_prev, page_of, visible_fields};
use super::{update, Msg, Notice};

/// A publish-blocking validation failure, reported next to the offending
/// field or control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingTargetName,
    NoMappedFields,
    InvalidFieldName(String),
    DuplicateFieldName(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingTargetName => write!(f, "target table must have a name"),
            ValidationError::NoMappedFields => {
                write!(f, "target table must have at least one mapped field")
            }
            ValidationError::InvalidFieldName(name) => write!(
                f,
                "field name \"{}\" must start with a letter and contain only letters, digits and underscores",
                name
            ),
            ValidationError::DuplicateFieldName(name) => {
                write!(f, "field name \"{}\" is already in use", name)
            }
        }
    }
}

/// Editor state for one synchronization model
#[derive(Debug)]
pub struct State {
    pub source: TableNode,
    pub target: TableNode,
    pub layout: PortLayout,
    pub edges: EdgeManager,
    /// Persisted id, present once loaded or saved
    pub model_id: Option<String>,
    /// Async state of the in-flight table configuration, if any
    pub configure_state: Resource<()>,
    /// Guards configuration responses against rapid reselection; a response
    /// carrying an older epoch is dropped
    config_epoch: u64,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// Fresh editor in "create new" mode
    pub fn new() -> Self {
        Self {
            source: TableNode::new(),
            target: TableNode::new(),
            layout: PortLayout::new(),
            edges: EdgeManager::new(),
            model_id: None,
            configure_state: Resource::NotAsked,
            config_epoch: 0,
        }
    }

    /// Load a persisted model. Field ids are assigned by array position on
    /// both sides; existing models open read-only.
    pub async fn load(service: &dyn CatalogService, id: &str) -> Result<Self> {
        let detail = service
            .get_sync_model_detail(id)
            .await
            .with_context(|| format!("Failed to load sync model {}", id))?;

        let mut state = Self::new();
        state.model_id = Some(detail.id.clone());
        state.source = node_from_persisted(&detail.source);
        state.target = node_from_persisted(&detail.target);
        state.recompute();

        log::info!(
            "Loaded sync model {} ({} source fields, {} target fields)",
            detail.id,
            state.source.items.len(),
            state.target.items.len()
        );
        Ok(state)
    }

    /// Clear both nodes for "create new" mode
    pub fn reset(&mut self) {
        self.source.reset();
        self.target.reset();
        self.edges = EdgeManager::new();
        self.model_id = None;
        self.configure_state = Resource::NotAsked;
        self.recompute();
    }

    /// Persistable form of the current state. The view-local `index_id` is
    /// stripped from every field.
    pub fn serialize(&self) -> Result<SyncModelPayload> {
        Ok(SyncModelPayload {
            source: table_payload(&self.source).context("source table is not configured")?,
            target: table_payload(&self.target).context("target table is not configured")?,
        })
    }

    /// Checks gating the save action. Also refreshes the target node's
    /// `form_error_status`.
    pub fn validate_for_publish(&mut self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let has_name = self
            .target
            .form_info
            .as_ref()
            .map_or(false, |info| !info.name.is_empty());
        self.target.form_error_status = !has_name;
        if !has_name {
            errors.push(ValidationError::MissingTargetName);
        }

        if !self.target.items.iter().any(|f| !f.unmapped) {
            errors.push(ValidationError::NoMappedFields);
        }

        let statuses = target_name_statuses(&self.target.items);
        for field in &self.target.items {
            match statuses[&field.index_id] {
                NameStatus::Ok => {}
                NameStatus::InvalidCharacters => {
                    errors.push(ValidationError::InvalidFieldName(field.name.clone()));
                }
                NameStatus::DuplicateName => {
                    errors.push(ValidationError::DuplicateFieldName(field.name.clone()));
                }
            }
        }

        errors
    }

    /// Apply one user action and return any transient message for the user
    pub fn update(&mut self, msg: Msg) -> Option<Notice> {
        update::update(self, msg)
    }

    /// Rebuild ports for the visible pages and reconcile the edge set.
    /// Runs after every mutation; never patches stale state incrementally.
    pub fn recompute(&mut self) {
        self.layout.rebuild(&self.source, &self.target);
        self.edges
            .reconcile(&mut self.layout, &self.source, &self.target);
    }

    /// Start a table configuration, superseding any outstanding one
    pub fn begin_configure(&mut self) -> u64 {
        self.config_epoch += 1;
        self.configure_state = Resource::Loading;
        self.config_epoch
    }

    pub fn epoch(&self) -> u64 {
        self.config_epoch
    }

    /// The model stays editable until published
    pub fn editable(&self) -> bool {
        self.source.edit_status && self.target.edit_status
    }

    pub fn node(&self, side: Side) -> &TableNode {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    pub fn node_mut(&mut self, side: Side) -> &mut TableNode {
        match side {
            Side::Source => &mut self.source,
            Side::Target => &mut self.target,
        }
    }

    /// Number of fields on a side that survive the current search filter
    pub fn filtered_len(&self, side: Side) -> usize {
        visible_fields(
            &self.source.items,
            &self.target.items,
            &self.node(side).keyword,
            side,
        )
        .len()
    }

    /// The page of rows currently visible on a side
    pub fn visible_page(&self, side: Side) -> Vec<Field> {
        let filtered = visible_fields(
            &self.source.items,
            &self.target.items,
            &self.node(side).keyword,
            side,
        );
        page_of(self.node(side).offset, &filtered)
            .iter()
            .map(|f| (*f).clone())
            .collect()
    }

    /// Which empty message to render for a side, if any
    pub fn empty_state(&self, side: Side) -> Option<EmptyState> {
        empty_state(self.node(side).items.len(), self.filtered_len(side))
    }

    pub fn has_prev_page(&self, side: Side) -> bool {
        has_prev(self.node(side).offset)
    }

    pub fn has_next_page(&self, side: Side) -> bool {
        has_next(self.node(side).offset, self.filtered_len(side))
    }

    /// Current name validation status per target field
    pub fn target_name_statuses(&self) -> HashMap<u32, NameStatus> {
        target_name_statuses(&self.target.items)
    }
}

fn node_from_persisted(table: &PersistedTable) -> TableNode {
    let mut node = TableNode::new();
    node.form_info = Some(FormInfo {
        name: table.name.clone(),
        datasource_id: table.datasource_id.clone(),
        database_type: table.database_type.clone(),
    });
    node.items = table
        .fields
        .iter()
        .enumerate()
        .map(|(i, f)| Field::from_persisted(i as u32, f))
        .collect();
    node.edit_status = false;
    node
}

fn table_payload(node: &TableNode) -> Option<PersistedTable> {
    let info = node.form_info.as_ref()?;
    Some(PersistedTable {
        name: info.name.clone(),
        datasource_id: info.datasource_id.clone(),
        database_type: info.database_type.clone(),
        fields: node.items.iter().map(Field::to_persisted).collect(),
    })
}

//! Port allocation for the currently visible field rows.
//!
//! Ports are transient graphical anchors: one per visible row per side,
//! discarded and regenerated on every recomputation pass. The lookup from
//! port id back to `(node, field, side)` is rebuilt from scratch each pass
//! and never carries entries from a previous page.

use std::collections::HashMap;

use super::models::{Field, Side, TableNode};
use super::visibility::{page_of, visible_fields};

/// Vertical offset of the first port row
pub const TOP_OFFSET: u32 = 40;

/// Vertical distance between consecutive port rows
pub const ROW_HEIGHT: u32 = 32;

/// Which side of a node a port sits on: target fields receive connections on
/// the left, source fields emit them on the right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSide {
    Left,
    Right,
}

/// A transient connection anchor bound to one visible field row
#[derive(Debug, Clone)]
pub struct Port {
    pub id: String,
    pub node: Side,
    pub field_id: u32,
    pub side: PortSide,
    /// Vertical position, a deterministic function of the visible row index
    pub y: u32,
    /// Visual affordance: filled when an edge is attached
    pub connected: bool,
}

/// Resolution of a port id back to its owning node and field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRef {
    pub node: Side,
    pub field_id: u32,
    pub side: PortSide,
}

/// All ports of the current recomputation pass, with the id lookup
#[derive(Debug, Default)]
pub struct PortLayout {
    ports: Vec<Port>,
    lookup: HashMap<String, PortRef>,
}

impl PortLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all ports and allocate fresh ones for the rows visible on
    /// each node's current page
    pub fn rebuild(&mut self, source: &TableNode, target: &TableNode) {
        self.ports.clear();
        self.lookup.clear();

        self.allocate_side(source, target, Side::Source);
        self.allocate_side(source, target, Side::Target);

        log::debug!("Allocated {} ports", self.ports.len());
    }

    fn allocate_side(&mut self, source: &TableNode, target: &TableNode, node: Side) {
        let (own, port_side) = match node {
            Side::Source => (source, PortSide::Right),
            Side::Target => (target, PortSide::Left),
        };

        let filtered = visible_fields(&source.items, &target.items, &own.keyword, node);
        let page = page_of(own.offset, &filtered);

        for (row, field) in page.iter().enumerate() {
            self.allocate(node, field, row as u32, port_side);
        }
    }

    fn allocate(&mut self, node: Side, field: &Field, row: u32, side: PortSide) {
        let port = Port {
            id: uuid::Uuid::new_v4().to_string(),
            node,
            field_id: field.index_id,
            side,
            y: TOP_OFFSET + row * ROW_HEIGHT,
            connected: false,
        };
        self.lookup.insert(
            port.id.clone(),
            PortRef {
                node,
                field_id: field.index_id,
                side,
            },
        );
        self.ports.push(port);
    }

    /// Resolve a port id; stale ids from a previous pass resolve to `None`
    pub fn resolve(&self, port_id: &str) -> Option<PortRef> {
        self.lookup.get(port_id).copied()
    }

    /// The port bound to a field on the given node, if that row is on the
    /// visible page
    pub fn port_for(&self, node: Side, field_id: u32) -> Option<&Port> {
        self.ports
            .iter()
            .find(|p| p.node == node && p.field_id == field_id)
    }

    pub fn set_connected(&mut self, node: Side, field_id: u32, connected: bool) {
        if let Some(port) = self
            .ports
            .iter_mut()
            .find(|p| p.node == node && p.field_id == field_id)
        {
            port.connected = connected;
        }
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }
}

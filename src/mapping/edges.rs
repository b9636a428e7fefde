//! Edge management and the field pairing invariant.
//!
//! An edge connects a source field's right port to the left port of the
//! target field with the same `index_id`; no other pairing is ever allowed
//! to survive. The relation index is keyed by that shared id, so pairing is
//! explicit rather than an accident of array positions. Edges themselves are
//! derived state: `reconcile` re-creates them for whatever rows are visible,
//! and a mapped field paged out of view keeps its mapping (the target field
//! stays `unmapped = false`) while its edge object is dropped until the page
//! is shown again.

use std::collections::HashMap;
use std::fmt;

use super::models::{Side, TableNode};
use super::ports::PortLayout;

/// A visual connection from a source port to a target port
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: String,
    pub source_port: String,
    pub target_port: String,
    /// Shared `index_id` of the two connected fields
    pub field_id: u32,
    pub selected: bool,
}

/// Rejection reasons for a user-initiated connection. The edge the user
/// dragged is already gone when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectError {
    /// The connection does not run from the source table into the target table
    NotTargetNode,
    /// The two fields do not share the same id
    FieldMismatch,
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectError::NotTargetNode => write!(f, "target table cannot connect to other tables"),
            ConnectError::FieldMismatch => write!(f, "can only connect to the corresponding field"),
        }
    }
}

/// Owns the relation index and keeps it consistent with the `unmapped`
/// flags on the target fields
#[derive(Debug, Default)]
pub struct EdgeManager {
    edges: HashMap<u32, Edge>,
}

impl EdgeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge_for(&self, field_id: u32) -> Option<&Edge> {
        self.edges.get(&field_id)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Ids of the currently registered edges, for comparing passes
    pub fn edge_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.edges.values().map(|e| e.id.clone()).collect();
        ids.sort();
        ids
    }

    /// Register a user-initiated connection between two ports.
    ///
    /// Either port missing from the current layout means the row scrolled
    /// off-page mid-drag; the request silently does nothing. A connection
    /// that violates the node or pairing rule is rejected and never
    /// registered, leaving the previous state untouched.
    pub fn connect(
        &mut self,
        layout: &mut PortLayout,
        from_port: &str,
        to_port: &str,
        target: &mut TableNode,
    ) -> Result<(), ConnectError> {
        let (from, to) = match (layout.resolve(from_port), layout.resolve(to_port)) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                log::debug!("Connection between unknown ports ignored");
                return Ok(());
            }
        };

        if from.node != Side::Source || to.node != Side::Target {
            return Err(ConnectError::NotTargetNode);
        }
        if from.field_id != to.field_id {
            return Err(ConnectError::FieldMismatch);
        }

        let field_id = to.field_id;
        match target.field_mut(field_id) {
            Some(field) if field.is_connectable() => field.unmapped = false,
            Some(_) => {
                log::debug!("Connection to untranslatable field {} ignored", field_id);
                return Ok(());
            }
            None => return Ok(()),
        }
        self.insert_edge(layout, field_id, from_port.to_string(), to_port.to_string());
        log::debug!("Connected field pair {}", field_id);
        Ok(())
    }

    /// Explicit unlink from the edge control: drops the edge and flags the
    /// target field as unmapped
    pub fn unlink(&mut self, layout: &mut PortLayout, field_id: u32, target: &mut TableNode) {
        self.drop_edge(layout, field_id);
        if let Some(field) = target.field_mut(field_id) {
            field.unmapped = true;
        }
        log::debug!("Unlinked field pair {}", field_id);
    }

    /// Structural removal by edge id (graph-level removal event). Takes the
    /// same path as an explicit unlink regardless of what triggered it.
    pub fn remove_edge_by_id(
        &mut self,
        layout: &mut PortLayout,
        edge_id: &str,
        target: &mut TableNode,
    ) {
        let field_id = self
            .edges
            .values()
            .find(|e| e.id == edge_id)
            .map(|e| e.field_id);
        if let Some(field_id) = field_id {
            self.unlink(layout, field_id, target);
        }
    }

    /// Re-derive the edge set for the current pass.
    ///
    /// For every paired field an edge exists exactly when the target field
    /// is mapped, its type is valid, and both ports are on their visible
    /// pages. Existing edges are kept (re-pointed at the freshly allocated
    /// ports) so a second pass with no intervening change is a no-op.
    pub fn reconcile(&mut self, layout: &mut PortLayout, source: &TableNode, target: &TableNode) {
        let mut desired: HashMap<u32, (String, String)> = HashMap::new();

        for field in &target.items {
            if field.unmapped || !field.is_connectable() {
                continue;
            }
            let source_port = layout.port_for(Side::Source, field.index_id);
            let target_port = layout.port_for(Side::Target, field.index_id);
            if let (Some(sp), Some(tp)) = (source_port, target_port) {
                desired.insert(field.index_id, (sp.id.clone(), tp.id.clone()));
            }
        }

        // Dormant or no longer qualifying edges are dropped; the unmapped
        // flag is not touched here, connect/unlink own that.
        self.edges.retain(|field_id, _| desired.contains_key(field_id));

        for (field_id, (source_port, target_port)) in desired {
            match self.edges.get_mut(&field_id) {
                Some(edge) => {
                    edge.source_port = source_port;
                    edge.target_port = target_port;
                }
                None => self.insert_edge(layout, field_id, source_port, target_port),
            }
        }

        for edge in self.edges.values_mut() {
            edge.selected = source.single_selected == Some(edge.field_id)
                || target.single_selected == Some(edge.field_id);
        }
        for edge in self.edges.values() {
            layout.set_connected(Side::Source, edge.field_id, true);
            layout.set_connected(Side::Target, edge.field_id, true);
        }
    }

    /// Select a field: highlight its own edge, if any, and mark the
    /// counterpart field on the other node
    pub fn select(
        &mut self,
        side: Side,
        field_id: u32,
        source: &mut TableNode,
        target: &mut TableNode,
    ) {
        self.clear_selection(source, target);

        let (own, other) = match side {
            Side::Source => (&mut *source, &mut *target),
            Side::Target => (&mut *target, &mut *source),
        };
        own.single_selected = Some(field_id);

        if let Some(edge) = self.edges.get_mut(&field_id) {
            edge.selected = true;
            if other.field(field_id).is_some() {
                other.related_selected = Some(field_id);
            }
        }
    }

    /// Selecting elsewhere clears all highlighting on both nodes
    pub fn clear_selection(&mut self, source: &mut TableNode, target: &mut TableNode) {
        source.single_selected = None;
        source.related_selected = None;
        target.single_selected = None;
        target.related_selected = None;
        for edge in self.edges.values_mut() {
            edge.selected = false;
        }
    }

    fn drop_edge(&mut self, layout: &mut PortLayout, field_id: u32) {
        if self.edges.remove(&field_id).is_some() {
            layout.set_connected(Side::Source, field_id, false);
            layout.set_connected(Side::Target, field_id, false);
        }
    }

    fn insert_edge(
        &mut self,
        layout: &mut PortLayout,
        field_id: u32,
        source_port: String,
        target_port: String,
    ) {
        layout.set_connected(Side::Source, field_id, true);
        layout.set_connected(Side::Target, field_id, true);
        self.edges.insert(
            field_id,
            Edge {
                id: uuid::Uuid::new_v4().to_string(),
                source_port,
                target_port,
                field_id,
                selected: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::models::{Field, FormInfo, TableNode, UNDEFINED_TYPE};

    fn node_with(names: &[&str]) -> TableNode {
        let mut node = TableNode::new();
        node.form_info = Some(FormInfo {
            name: "t".to_string(),
            datasource_id: "ds".to_string(),
            database_type: "mysql".to_string(),
        });
        node.items = names
            .iter()
            .enumerate()
            .map(|(i, name)| Field {
                index_id: i as u32,
                name: name.to_string(),
                type_name: "varchar".to_string(),
                length: None,
                precision: None,
                description: String::new(),
                unmapped: false,
                virtual_type: None,
            })
            .collect();
        node
    }

    fn setup(names: &[&str]) -> (TableNode, TableNode, PortLayout, EdgeManager) {
        let source = node_with(names);
        let target = node_with(names);
        let mut layout = PortLayout::new();
        layout.rebuild(&source, &target);
        (source, target, layout, EdgeManager::new())
    }

    fn port_id(layout: &PortLayout, node: Side, field_id: u32) -> String {
        layout.port_for(node, field_id).unwrap().id.clone()
    }

    #[test]
    fn reconcile_is_idempotent() {
        let (source, target, mut layout, mut edges) = setup(&["a", "b", "c"]);

        edges.reconcile(&mut layout, &source, &target);
        let first = edges.edge_ids();
        assert_eq!(first.len(), 3);

        edges.reconcile(&mut layout, &source, &target);
        assert_eq!(edges.edge_ids(), first);
    }

    #[test]
    fn every_edge_connects_matching_ids() {
        let (source, target, mut layout, mut edges) = setup(&["a", "b"]);
        edges.reconcile(&mut layout, &source, &target);

        for edge in edges.edges() {
            let from = layout.resolve(&edge.source_port).unwrap();
            let to = layout.resolve(&edge.target_port).unwrap();
            assert_eq!(from.field_id, to.field_id);
            assert_eq!(edge.field_id, from.field_id);
        }
    }

    #[test]
    fn mismatched_connection_is_rejected() {
        let (_source, mut target, mut layout, mut edges) = setup(&["a", "b"]);

        let from = port_id(&layout, Side::Source, 0);
        let to = port_id(&layout, Side::Target, 1);
        let result = edges.connect(&mut layout, &from, &to, &mut target);
        assert_eq!(result, Err(ConnectError::FieldMismatch));
        assert!(edges.is_empty());
    }

    #[test]
    fn connection_into_source_node_is_rejected() {
        let (_source, mut target, mut layout, mut edges) = setup(&["a", "b"]);

        let from = port_id(&layout, Side::Source, 0);
        let to = port_id(&layout, Side::Source, 1);
        let result = edges.connect(&mut layout, &from, &to, &mut target);
        assert_eq!(result, Err(ConnectError::NotTargetNode));
        assert!(edges.is_empty());
    }

    #[test]
    fn unknown_ports_are_ignored() {
        let (_source, mut target, mut layout, mut edges) = setup(&["a"]);
        let result = edges.connect(&mut layout, "gone-1", "gone-2", &mut target);
        assert_eq!(result, Ok(()));
        assert!(edges.is_empty());
    }

    #[test]
    fn connect_then_unlink_restores_unmapped() {
        let (_source, mut target, mut layout, mut edges) = setup(&["a"]);
        target.items[0].unmapped = true;

        let from = port_id(&layout, Side::Source, 0);
        let to = port_id(&layout, Side::Target, 0);
        edges.connect(&mut layout, &from, &to, &mut target).unwrap();
        assert!(!target.items[0].unmapped);
        assert_eq!(edges.len(), 1);

        edges.unlink(&mut layout, 0, &mut target);
        assert!(target.items[0].unmapped);
        assert!(edges.is_empty());
    }

    #[test]
    fn structural_removal_flags_target_unmapped() {
        let (source, mut target, mut layout, mut edges) = setup(&["a"]);
        edges.reconcile(&mut layout, &source, &target);
        let edge_id = edges.edges().next().unwrap().id.clone();

        edges.remove_edge_by_id(&mut layout, &edge_id, &mut target);
        assert!(edges.is_empty());
        assert!(target.items[0].unmapped);
    }

    #[test]
    fn unmapped_and_undefined_fields_get_no_edge() {
        let (source, mut target, mut layout, mut edges) = setup(&["a", "b", "c"]);
        target.items[0].unmapped = true;
        target.items[1].type_name = UNDEFINED_TYPE.to_string();

        edges.reconcile(&mut layout, &source, &target);
        assert_eq!(edges.len(), 1);
        assert!(edges.edge_for(2).is_some());
    }

    #[test]
    fn selection_highlights_edge_and_counterpart() {
        let (mut source, mut target, mut layout, mut edges) = setup(&["a", "b"]);
        edges.reconcile(&mut layout, &source, &target);

        edges.select(Side::Source, 1, &mut source, &mut target);
        assert_eq!(source.single_selected, Some(1));
        assert_eq!(target.related_selected, Some(1));
        assert!(edges.edge_for(1).unwrap().selected);
        assert!(!edges.edge_for(0).unwrap().selected);

        edges.clear_selection(&mut source, &mut target);
        assert_eq!(source.single_selected, None);
        assert_eq!(target.related_selected, None);
        assert!(!edges.edge_for(1).unwrap().selected);
    }
}

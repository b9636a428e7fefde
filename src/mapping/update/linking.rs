use super::super::app::State;
use super::super::models::Side;
use super::super::Notice;

pub fn handle_field_selected(state: &mut State, side: Side, field_id: u32) -> Option<Notice> {
    if state.node(side).field(field_id).is_none() {
        return None;
    }
    state
        .edges
        .select(side, field_id, &mut state.source, &mut state.target);
    state.recompute();
    None
}

pub fn handle_selection_cleared(state: &mut State) -> Option<Notice> {
    state
        .edges
        .clear_selection(&mut state.source, &mut state.target);
    state.recompute();
    None
}

/// A user-initiated connection. An illegal edge never survives this call:
/// the manager rejects it and the notice carries the reason.
pub fn handle_connect_requested(state: &mut State, from_port: &str, to_port: &str) -> Option<Notice> {
    if !state.editable() {
        log::debug!("Ignoring connection on a published model");
        return None;
    }

    let result = state
        .edges
        .connect(&mut state.layout, from_port, to_port, &mut state.target);
    state.recompute();

    match result {
        Ok(()) => None,
        Err(e) => Some(Notice::error(e.to_string())),
    }
}

pub fn handle_edge_unlinked(state: &mut State, field_id: u32) -> Option<Notice> {
    if !state.editable() {
        return None;
    }

    state
        .edges
        .unlink(&mut state.layout, field_id, &mut state.target);
    state.recompute();
    None
}

/// Structural edge removal (graph-level event); same consequences as an
/// explicit unlink whichever path triggered it
pub fn handle_edge_removed(state: &mut State, edge_id: &str) -> Option<Notice> {
    state
        .edges
        .remove_edge_by_id(&mut state.layout, edge_id, &mut state.target);
    state.recompute();
    None
}

use super::super::app::State;
use super::super::models::{Side, DESCRIPTION_MAX};
use super::super::Notice;

/// Rename a target field. Validation is not enforced here; the name status
/// map flags problems inline and publishing is blocked separately.
pub fn handle_target_name_edited(state: &mut State, field_id: u32, name: String) -> Option<Notice> {
    if !state.editable() {
        return None;
    }

    if let Some(field) = state.target.field_mut(field_id) {
        field.name = name;
        state.recompute();
    }
    None
}

pub fn handle_description_edited(
    state: &mut State,
    side: Side,
    field_id: u32,
    text: String,
) -> Option<Notice> {
    if !state.editable() {
        return None;
    }

    if let Some(field) = state.node_mut(side).field_mut(field_id) {
        field.description = text.chars().take(DESCRIPTION_MAX).collect();
        state.recompute();
    }
    None
}

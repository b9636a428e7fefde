use super::super::app::State;
use super::super::models::{PageDirection, Side};
use super::super::visibility::{has_next, has_prev};
use super::super::Notice;

/// Move one page in either direction. Boundary requests are ignored, which
/// is what the disabled pager controls express.
pub fn handle_page_changed(state: &mut State, side: Side, direction: PageDirection) -> Option<Notice> {
    let len = state.filtered_len(side);
    let node = state.node_mut(side);

    match direction {
        PageDirection::Prev if has_prev(node.offset) => node.offset -= 1,
        PageDirection::Next if has_next(node.offset, len) => node.offset += 1,
        _ => return None,
    }

    state.recompute();
    None
}

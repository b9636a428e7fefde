use crate::resource::Resource;

use super::super::app::State;
use super::super::edges::EdgeManager;
use super::super::models::{Field, FormInfo};
use super::super::Notice;

/// There is no request cancellation, so a response is applied only when it
/// belongs to the configuration the user most recently started.
fn is_stale(state: &State, epoch: u64) -> bool {
    if epoch != state.epoch() {
        log::debug!(
            "Dropping configuration response for epoch {} (current {})",
            epoch,
            state.epoch()
        );
        return true;
    }
    false
}

/// Fresh field lists invalidate selection, paging and every edge; the
/// recomputation pass rebuilds what is still valid.
fn reset_view_state(state: &mut State) {
    state.source.offset = 0;
    state.target.offset = 0;
    state.edges = EdgeManager::new();
    state
        .edges
        .clear_selection(&mut state.source, &mut state.target);
}

pub fn handle_source_table_configured(
    state: &mut State,
    info: FormInfo,
    fields: Vec<Field>,
    translated_target: Option<Vec<Field>>,
    epoch: u64,
) -> Option<Notice> {
    if is_stale(state, epoch) {
        return None;
    }

    state.configure_state = Resource::Success(());
    log::info!(
        "Configured source table {} with {} fields",
        info.name,
        fields.len()
    );

    state.source.form_info = Some(info);
    state.source.items = fields;
    if let Some(translated) = translated_target {
        state.target.items = translated;
    }

    reset_view_state(state);
    state.recompute();
    None
}

pub fn handle_target_table_configured(
    state: &mut State,
    info: FormInfo,
    fields: Vec<Field>,
    epoch: u64,
) -> Option<Notice> {
    if is_stale(state, epoch) {
        return None;
    }

    state.configure_state = Resource::Success(());
    log::info!(
        "Configured target table {} with {} fields",
        info.name,
        fields.len()
    );

    state.target.form_error_status = info.name.is_empty();
    state.target.form_info = Some(info);
    state.target.items = fields;

    reset_view_state(state);
    state.recompute();
    None
}

/// The triggering operation is abandoned; no partial field list is applied
pub fn handle_configure_failed(state: &mut State, error: String, epoch: u64) -> Option<Notice> {
    if is_stale(state, epoch) {
        return None;
    }

    state.configure_state = Resource::Failure(error.clone());
    Some(Notice::error(error))
}

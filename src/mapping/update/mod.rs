pub mod configure;
pub mod editing;
pub mod linking;
pub mod paging;
pub mod search;

use super::app::State;
use super::{Msg, Notice};

pub fn update(state: &mut State, msg: Msg) -> Option<Notice> {
    match msg {
        // Search
        Msg::SearchChanged(keyword) => search::handle_search_changed(state, keyword),

        // Paging
        Msg::PageChanged(side, direction) => paging::handle_page_changed(state, side, direction),

        // Selection and edges
        Msg::FieldSelected(side, field_id) => linking::handle_field_selected(state, side, field_id),
        Msg::SelectionCleared => linking::handle_selection_cleared(state),
        Msg::ConnectRequested { from_port, to_port } => {
            linking::handle_connect_requested(state, &from_port, &to_port)
        }
        Msg::EdgeUnlinked(field_id) => linking::handle_edge_unlinked(state, field_id),
        Msg::EdgeRemoved(edge_id) => linking::handle_edge_removed(state, &edge_id),

        // Field editing
        Msg::TargetNameEdited(field_id, name) => {
            editing::handle_target_name_edited(state, field_id, name)
        }
        Msg::DescriptionEdited(side, field_id, text) => {
            editing::handle_description_edited(state, side, field_id, text)
        }

        // Table configuration
        Msg::SourceTableConfigured {
            info,
            fields,
            translated_target,
            epoch,
        } => configure::handle_source_table_configured(state, info, fields, translated_target, epoch),
        Msg::TargetTableConfigured { info, fields, epoch } => {
            configure::handle_target_table_configured(state, info, fields, epoch)
        }
        Msg::ConfigureFailed { error, epoch } => {
            configure::handle_configure_failed(state, error, epoch)
        }
    }
}

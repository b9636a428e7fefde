use super::super::app::State;
use super::super::Notice;

/// The keyword filters both lists jointly, so it is mirrored onto both
/// nodes; paging restarts from the first page of the filtered result.
pub fn handle_search_changed(state: &mut State, keyword: String) -> Option<Notice> {
    state.source.keyword = keyword.clone();
    state.target.keyword = keyword;
    state.source.offset = 0;
    state.target.offset = 0;
    state.recompute();
    None
}

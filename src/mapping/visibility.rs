//! Search filtering and paging over the positionally paired field lists.

use super::models::{EmptyState, Field, Side, PAGE_SIZE};

/// Filter the paired field lists by a search keyword and return the
/// filtered list for one side.
///
/// A pair `(source[i], target[i])` is kept when either side's name contains
/// the keyword case-insensitively, so a hit on the source name also keeps
/// the target row at the same position. An empty keyword keeps everything.
pub fn visible_fields<'a>(
    source: &'a [Field],
    target: &'a [Field],
    keyword: &str,
    side: Side,
) -> Vec<&'a Field> {
    let own = match side {
        Side::Source => source,
        Side::Target => target,
    };

    if keyword.is_empty() {
        return own.iter().collect();
    }

    let needle = keyword.to_lowercase();
    let matches = |field: Option<&Field>| {
        field.map_or(false, |f| f.name.to_lowercase().contains(&needle))
    };

    let rows = source.len().max(target.len());
    (0..rows)
        .filter(|&i| matches(source.get(i)) || matches(target.get(i)))
        .filter_map(|i| own.get(i))
        .collect()
}

/// Slice of the filtered list visible on the given page
pub fn page_of<'a, 'b>(offset: usize, filtered: &'b [&'a Field]) -> &'b [&'a Field] {
    let start = (offset * PAGE_SIZE).min(filtered.len());
    let end = (start + PAGE_SIZE).min(filtered.len());
    &filtered[start..end]
}

pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// The previous-page control is enabled away from the first page
pub fn has_prev(offset: usize) -> bool {
    offset > 0
}

/// The next-page control is disabled exactly on the last page
pub fn has_next(offset: usize, len: usize) -> bool {
    offset + 1 < page_count(len)
}

/// Distinguish "nothing configured" from "nothing matches the search"
pub fn empty_state(total: usize, filtered: usize) -> Option<EmptyState> {
    if total == 0 {
        Some(EmptyState::NoFieldsConfigured)
    } else if filtered == 0 {
        Some(EmptyState::NoSearchMatches)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<Field> {
        names
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
            .collect()
    }

    #[test]
    fn keyword_matches_either_side_of_a_pair() {
        let source = fields(&["id", "user_id", "name"]);
        let target = fields(&["id", "uid", "uname"]);

        let visible = visible_fields(&source, &target, "user", Side::Target);
        let names: Vec<&str> = visible.iter().map(|f| f.name.as_str()).collect();
        // index 1 matches through the source name even though "uid" does not
        assert_eq!(names, vec!["uid"]);

        let visible = visible_fields(&source, &target, "user", Side::Source);
        let names: Vec<&str> = visible.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["user_id"]);
    }

    #[test]
    fn keyword_is_case_insensitive() {
        let source = fields(&["OrderId", "total"]);
        let target = fields(&["order_id", "total"]);

        let visible = visible_fields(&source, &target, "ORDER", Side::Source);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "OrderId");
    }

    #[test]
    fn empty_keyword_returns_full_list() {
        let source = fields(&["a", "b", "c"]);
        let target = fields(&["x", "y"]);
        assert_eq!(visible_fields(&source, &target, "", Side::Source).len(), 3);
        assert_eq!(visible_fields(&source, &target, "", Side::Target).len(), 2);
    }

    #[test]
    fn pages_slice_by_fixed_size() {
        let names: Vec<String> = (0..25).map(|i| format!("f{}", i)).collect();
        let name_refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let items = fields(&name_refs);
        let refs: Vec<&Field> = items.iter().collect();

        let first = page_of(0, &refs);
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].index_id, 0);
        assert_eq!(first[9].index_id, 9);

        let last = page_of(2, &refs);
        assert_eq!(last.len(), 5);
        assert_eq!(last[0].index_id, 20);
        assert_eq!(last[4].index_id, 24);
    }

    #[test]
    fn pager_controls_disable_at_boundaries() {
        assert!(!has_prev(0));
        assert!(has_prev(1));

        // 25 fields: next is disabled exactly when offset + 1 == ceil(25 / 10)
        assert!(has_next(0, 25));
        assert!(has_next(1, 25));
        assert!(!has_next(2, 25));
    }

    #[test]
    fn empty_states_are_distinct() {
        assert_eq!(empty_state(0, 0), Some(EmptyState::NoFieldsConfigured));
        assert_eq!(empty_state(5, 0), Some(EmptyState::NoSearchMatches));
        assert_eq!(empty_state(5, 3), None);
    }
}

//! Pure text filtering over loaded collections.
//!
//! Every list page recomputes its filtered view synchronously on each
//! keystroke; the projection never mutates the source and preserves input
//! ordering. An empty query returns the full collection.

/// Case-insensitive substring test. `needle` must already be lowercased —
/// callers lowercase the query once per filter pass, not once per field.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Project `items` down to those matching `query` under `matches`, which
/// receives each item and the lowercased query.
pub fn filter_items<T: Clone>(
    items: &[T],
    query: &str,
    matches: impl Fn(&T, &str) -> bool,
) -> Vec<T> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| matches(item, &query))
        .cloned()
        .collect()
}

use flow_model::Listable;

/// Case-insensitive substring match against any of `fields`.
///
/// `needle` must already be lowercased; an empty needle matches everything.
pub fn matches_search<T: Listable>(record: &T, needle: &str, fields: &[String]) -> bool {
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| record.field(field).text().to_lowercase().contains(needle))
}

/// Normalize a raw search box value into the needle used by [`matches_search`].
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

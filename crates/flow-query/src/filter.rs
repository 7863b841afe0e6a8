use flow_model::{FilterState, Listable};

/// Exact-match field filters and the optional date range.
///
/// Filters set to "all" are skipped. While a date range is active, records
/// without a date do not match.
pub fn matches_filters<T: Listable>(record: &T, filter: &FilterState) -> bool {
    let fields_match = filter
        .active_filters()
        .all(|(field, accepted)| record.field(field).text() == accepted);
    if !fields_match {
        return false;
    }
    match filter.date_range {
        Some(range) if !range.is_open() => record
            .record_date()
            .is_some_and(|date| range.contains(date)),
        _ => true,
    }
}

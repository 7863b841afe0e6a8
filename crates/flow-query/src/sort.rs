use std::cmp::Ordering;

use flow_model::{FieldValue, Listable, SortDirection, SortState};

/// Stable sort by the sort key; no key leaves `rows` in source order.
pub fn sort_rows<'a, T: Listable>(rows: &mut Vec<&'a T>, sort: &SortState) {
    let Some(key) = sort.key.as_deref() else {
        return;
    };
    let mut keyed: Vec<(FieldValue, &'a T)> =
        rows.drain(..).map(|row| (row.field(key), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| directed(a.compare(b), sort.direction));
    rows.extend(keyed.into_iter().map(|(_, row)| row));
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

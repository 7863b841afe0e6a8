//! Per-view list state.

use flow_model::{
    DateRange, FieldFilter, FilterState, Listable, PageState, SortState, ViewConfig,
};
use flow_query::{Aggregate, Derived, PageWindow, QueryPipeline, QueryResult};

/// Filter, sort, and page state of one list view.
///
/// Mutators never reset the page index. Deriving clamps it against the current
/// result, and [`ViewState::sync`] writes the clamped index back so the next
/// `next_page` starts from what was actually shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filter: FilterState,
    pub sort: SortState,
    pub page: PageState,
    pipeline: QueryPipeline,
}

impl ViewState {
    pub fn new(pipeline: QueryPipeline, config: &ViewConfig) -> Self {
        Self {
            filter: FilterState::default(),
            sort: SortState::none(),
            page: PageState::new(config.page_size),
            pipeline,
        }
    }

    pub fn for_listable<T: Listable>(config: &ViewConfig) -> Self {
        Self::new(QueryPipeline::for_listable::<T>(), config)
    }

    pub fn pipeline(&self) -> &QueryPipeline {
        &self.pipeline
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    /// Set one field filter; `"all"` removes the constraint.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<FieldFilter>) {
        self.filter.field_filters.insert(field.into(), value.into());
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.filter.date_range = range;
    }

    /// Drop search, field filters, and the date range. Sort and page stay.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    pub fn toggle_sort(&mut self, key: &str) {
        self.sort.toggle(key);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page.page_size = page_size.max(1);
    }

    pub fn go_to_page(&mut self, page_index: usize) {
        self.page.page_index = page_index;
    }

    pub fn next_page(&mut self) {
        self.page.page_index = self.page.page_index.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.page.page_index = self.page.page_index.saturating_sub(1);
    }

    pub fn derive<'a, T: Listable>(&self, records: &'a [T]) -> QueryResult<'a, T> {
        self.pipeline
            .query(records, &self.filter, &self.sort, &self.page)
    }

    pub fn derive_with<'a, T, A>(&self, records: &'a [T]) -> Derived<'a, T, A>
    where
        T: Listable,
        A: Aggregate<T>,
    {
        self.pipeline
            .query_with(records, &self.filter, &self.sort, &self.page)
    }

    /// Adopt the clamped page index of a derived window.
    pub fn sync(&mut self, window: PageWindow) {
        self.page.page_index = window.page_index;
    }
}

#[cfg(test)]
mod tests {
    use flow_model::Record;

    use super::*;

    fn rows(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                let group = if i % 2 == 0 { "a" } else { "b" };
                Record::new(format!("R-{i:02}")).with_field("grupo", group)
            })
            .collect()
    }

    #[test]
    fn narrowing_filter_clamps_and_sync_writes_back() {
        let records = rows(30);
        let mut view = ViewState::new(QueryPipeline::default(), &ViewConfig { page_size: 10 });
        view.go_to_page(2);
        view.set_filter("grupo", "a");

        let result = view.derive(&records);
        assert_eq!(result.total_count(), 15);
        assert_eq!(result.page_index(), 1);
        assert_eq!(view.page.page_index, 2);

        view.sync(result.window());
        assert_eq!(view.page.page_index, 1);
        view.previous_page();
        assert_eq!(view.derive(&records).page()[0].id, "R-00");
    }
}

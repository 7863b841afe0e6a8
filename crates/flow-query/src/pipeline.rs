use tracing::debug;

use flow_model::{FilterState, Listable, PageState, SortState};

use crate::aggregate::Aggregate;
use crate::filter::matches_filters;
use crate::paginate::{PageWindow, page_window};
use crate::search::{matches_search, normalize_term};
use crate::sort::sort_rows;

/// The search scope of one list view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryPipeline {
    searchable: Vec<String>,
}

impl QueryPipeline {
    /// Search the fields a record type declares as searchable.
    pub fn for_listable<T: Listable>() -> Self {
        Self::with_search_fields(T::SEARCHABLE.iter().copied())
    }

    pub fn with_search_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            searchable: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn searchable(&self) -> &[String] {
        &self.searchable
    }

    /// Search and field filters, in source order.
    pub fn filtered<'a, T: Listable>(&self, records: &'a [T], filter: &FilterState) -> Vec<&'a T> {
        let needle = normalize_term(&filter.search_term);
        records
            .iter()
            .filter(|record| matches_search(*record, &needle, &self.searchable))
            .filter(|record| matches_filters(*record, filter))
            .collect()
    }

    pub fn query<'a, T: Listable>(
        &self,
        records: &'a [T],
        filter: &FilterState,
        sort: &SortState,
        page: &PageState,
    ) -> QueryResult<'a, T> {
        let mut matched = self.filtered(records, filter);
        sort_rows(&mut matched, sort);
        let window = page_window(matched.len(), page);
        debug!(
            source_count = records.len(),
            matched = matched.len(),
            page_index = window.page_index,
            total_pages = window.total_pages,
            "list query derived"
        );
        QueryResult { matched, window }
    }

    /// Derive the page and an aggregate from one filtered intermediate.
    pub fn query_with<'a, T, A>(
        &self,
        records: &'a [T],
        filter: &FilterState,
        sort: &SortState,
        page: &PageState,
    ) -> Derived<'a, T, A>
    where
        T: Listable,
        A: Aggregate<T>,
    {
        let result = self.query(records, filter, sort, page);
        let aggregate = A::from_rows(result.matched.iter().copied());
        Derived { result, aggregate }
    }
}

/// Rows matching a query, sorted, with the window of the requested page.
#[derive(Debug, Clone)]
pub struct QueryResult<'a, T> {
    matched: Vec<&'a T>,
    window: PageWindow,
}

impl<'a, T> QueryResult<'a, T> {
    /// Rows of the current page.
    pub fn page(&self) -> &[&'a T] {
        &self.matched[self.window.range()]
    }

    /// All filtered rows in sort order, unpaginated (what exports consume).
    pub fn matched(&self) -> &[&'a T] {
        &self.matched
    }

    pub fn total_count(&self) -> usize {
        self.matched.len()
    }

    pub fn total_pages(&self) -> usize {
        self.window.total_pages
    }

    /// The page actually shown, after clamping.
    pub fn page_index(&self) -> usize {
        self.window.page_index
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// Iterate every page in order.
    pub fn pages(&self) -> impl Iterator<Item = &[&'a T]> {
        self.matched.chunks(self.window.page_size.max(1))
    }
}

/// A query result together with its aggregate over the same rows.
#[derive(Debug, Clone)]
pub struct Derived<'a, T, A> {
    pub result: QueryResult<'a, T>,
    pub aggregate: A,
}

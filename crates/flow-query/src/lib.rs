//! List query pipeline shared by every list view.
//!
//! A query runs search → field filters → sort → paginate over a borrowed
//! collection. Aggregates are computed from the same filtered rows as the
//! page, so displayed totals always match displayed rows. Nothing here
//! mutates the source collection or fails.

pub mod aggregate;
pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod search;
pub mod sort;

pub use aggregate::{
    Aggregate, ClientTotals, GroupSum, InventoryTotals, LedgerTotals, SaleTotals,
    UNCATEGORIZED_LABEL, group_sums,
};
pub use filter::matches_filters;
pub use paginate::{PageWindow, page_window};
pub use pipeline::{Derived, QueryPipeline, QueryResult};
pub use search::matches_search;
pub use sort::sort_rows;

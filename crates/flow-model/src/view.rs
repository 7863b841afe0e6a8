//! Per-view filter, sort, and pagination state.
//!
//! These values are owned by a single view and never persisted. Mutating them
//! never touches the underlying collection.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{ModelError, Result};
use crate::options::DEFAULT_PAGE_SIZE;

/// Sentinel accepted value meaning "do not filter on this field".
pub const ALL: &str = "all";

/// Accepted value for one field filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldFilter {
    #[default]
    All,
    Equals(String),
}

impl FieldFilter {
    pub fn accepted(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Equals(value) => Some(value),
        }
    }
}

impl From<&str> for FieldFilter {
    fn from(value: &str) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Equals(value.to_string())
        }
    }
}

/// Inclusive date range. An open end matches everything on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_term: String,
    pub field_filters: BTreeMap<String, FieldFilter>,
    pub date_range: Option<DateRange>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<FieldFilter>) -> Self {
        self.field_filters.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Field filters that actually constrain the result, i.e. not "all".
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.field_filters
            .iter()
            .filter_map(|(field, filter)| filter.accepted().map(|value| (field.as_str(), value)))
    }

    /// True when no search, field filter, or date range is in effect.
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.active_filters().next().is_none()
            && self.date_range.is_none_or(|range| range.is_open())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Parse a `FIELD=VALUE` filter expression.
pub fn parse_filter(expr: &str) -> Result<(String, FieldFilter)> {
    let (field, value) = expr
        .split_once('=')
        .ok_or_else(|| ModelError::InvalidFilter(expr.to_string()))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(ModelError::InvalidFilter(expr.to_string()));
    }
    Ok((field.to_string(), FieldFilter::from(value.trim())))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ModelError::InvalidFilter(value.to_string())),
        }
    }
}

/// Column sort state. `key == None` keeps the source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: SortDirection::Descending,
        }
    }

    /// Column-header click: ascending → descending → unsorted on the same
    /// key; a different key always starts ascending.
    pub fn toggle(&mut self, key: &str) {
        match (self.key.as_deref(), self.direction) {
            (Some(current), SortDirection::Ascending) if current == key => {
                self.direction = SortDirection::Descending;
            }
            (Some(current), SortDirection::Descending) if current == key => {
                *self = Self::none();
            }
            _ => *self = Self::ascending(key),
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.key.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// A zero page size is treated as one row per page.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn at(mut self, page_index: usize) -> Self {
        self.page_index = page_index;
        self
    }

    pub fn effective_size(&self) -> usize {
        self.page_size.max(1)
    }
}

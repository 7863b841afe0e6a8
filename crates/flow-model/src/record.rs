//! The listable record abstraction used by the query pipeline.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Document key holding a record's date, shared by every dated collection.
pub const DATE_FIELD: &str = "fecha";

/// Any entity that can be searched, filtered, sorted, and paged.
pub trait Listable {
    /// Fields matched by the free-text search box.
    const SEARCHABLE: &'static [&'static str];

    fn record_id(&self) -> &str;

    /// Read a named field. Unknown names yield [`FieldValue::Missing`].
    fn field(&self, name: &str) -> FieldValue;

    /// Date used by date-range filters.
    fn record_date(&self) -> Option<NaiveDate> {
        self.field(DATE_FIELD).as_date()
    }
}

/// A record with a dynamic field set, e.g. a row from an arbitrary CSV file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl Listable for Record {
    const SEARCHABLE: &'static [&'static str] = &[];

    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        if name == "id" {
            return FieldValue::Text(self.id.clone());
        }
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

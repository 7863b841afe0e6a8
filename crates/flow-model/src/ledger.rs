//! GYA ("gastos y abonos") ledger entries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::record::Listable;
use crate::value::FieldValue;

/// Document keys of a stored ledger entry.
pub mod fields {
    pub const ID: &str = "id";
    pub const DATE: &str = "fecha";
    pub const KIND: &str = "tipo";
    pub const DESTINATION: &str = "destino";
    pub const ORIGIN: &str = "origen";
    pub const CONCEPT: &str = "concepto";
    pub const CATEGORY: &str = "categoria";
    pub const AMOUNT: &str = "monto";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "ingreso")]
    Income,
    #[serde(rename = "gasto")]
    Expense,
    #[serde(rename = "abono")]
    Payment,
    #[serde(rename = "transferencia")]
    Transfer,
}

impl EntryKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Income => "ingreso",
            Self::Expense => "gasto",
            Self::Payment => "abono",
            Self::Transfer => "transferencia",
        }
    }

    /// Income and payments add to the destination's balance.
    pub fn is_inflow(&self) -> bool {
        matches!(self, Self::Income | Self::Payment)
    }

    pub fn is_outflow(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntryKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "ingreso" | "income" => Ok(Self::Income),
            "gasto" | "egreso" | "expense" => Ok(Self::Expense),
            "abono" | "payment" => Ok(Self::Payment),
            "transferencia" | "transfer" => Ok(Self::Transfer),
            _ => Err(ModelError::UnknownEntryKind(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "tipo")]
    pub kind: EntryKind,
    #[serde(rename = "destino")]
    pub destination: String,
    #[serde(rename = "origen", default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(rename = "concepto", default)]
    pub concept: String,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "monto")]
    pub amount: f64,
    /// Id of the sale or transfer that produced this entry.
    #[serde(rename = "referencia", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Listable for LedgerEntry {
    const SEARCHABLE: &'static [&'static str] = &[fields::CONCEPT, fields::CATEGORY];

    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            fields::ID => self.id.as_str().into(),
            fields::DATE => self.date.into(),
            fields::KIND => self.kind.label().into(),
            fields::DESTINATION => self.destination.as_str().into(),
            fields::ORIGIN => self.origin.clone().into(),
            fields::CONCEPT => self.concept.as_str().into(),
            fields::CATEGORY => self.category.clone().into(),
            fields::AMOUNT => self.amount.into(),
            _ => FieldValue::Missing,
        }
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.date
    }
}

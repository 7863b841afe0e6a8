use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::Listable;
use crate::value::FieldValue;

/// Document keys of a stored transfer between vaults.
pub mod fields {
    pub const ID: &str = "id";
    pub const DATE: &str = "fecha";
    pub const FROM_VAULT: &str = "origen";
    pub const TO_VAULT: &str = "destino";
    pub const AMOUNT: &str = "monto";
    pub const CONCEPT: &str = "concepto";
}

/// Money moved from one vault to another.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transfer {
    pub id: String,
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "origen")]
    pub from_vault: String,
    #[serde(rename = "destino")]
    pub to_vault: String,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "concepto", default)]
    pub concept: String,
}

impl Listable for Transfer {
    const SEARCHABLE: &'static [&'static str] =
        &[fields::CONCEPT, fields::FROM_VAULT, fields::TO_VAULT];

    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            fields::ID => self.id.as_str().into(),
            fields::DATE => self.date.into(),
            fields::FROM_VAULT => self.from_vault.as_str().into(),
            fields::TO_VAULT => self.to_vault.as_str().into(),
            fields::AMOUNT => self.amount.into(),
            fields::CONCEPT => self.concept.as_str().into(),
            _ => FieldValue::Missing,
        }
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.date
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::Listable;
use crate::value::{FieldValue, same_name};

pub mod fields {
    pub const ID: &str = "id";
    pub const NAME: &str = "nombre";
    pub const CAPITAL: &str = "capitalActual";
}

/// A named cash-holding bucket ("bóveda"), e.g. Bóveda Monte or Bóveda USA.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vault {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "capitalActual", default)]
    pub capital: f64,
}

impl Vault {
    /// Whether a ledger destination or transfer endpoint names this vault.
    pub fn matches(&self, name: &str) -> bool {
        same_name(name, &self.id) || same_name(name, &self.name)
    }
}

impl Listable for Vault {
    const SEARCHABLE: &'static [&'static str] = &[fields::NAME, fields::ID];

    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            fields::ID => self.id.as_str().into(),
            fields::NAME => self.name.as_str().into(),
            fields::CAPITAL => self.capital.into(),
            _ => FieldValue::Missing,
        }
    }
}

/// A reconciliation snapshot ("corte") of one vault's balance ("RF Actual").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultCut {
    pub vault: String,
    pub as_of: Option<NaiveDate>,
    pub income: f64,
    pub expense: f64,
    pub transfers_in: f64,
    pub transfers_out: f64,
    pub balance: f64,
    pub entry_count: usize,
}

use serde::{Deserialize, Serialize};

use crate::record::Listable;
use crate::value::FieldValue;

/// Document keys of a stored inventory item.
pub mod fields {
    pub const ID: &str = "id";
    pub const NAME: &str = "nombre";
    pub const CATEGORY: &str = "categoria";
    pub const STOCK: &str = "stock";
    pub const UNIT_COST: &str = "costoUnitario";
    /// Derived: `agotado`, `bajo`, or `disponible`.
    pub const STOCK_LEVEL: &str = "nivelStock";
}

/// Stock below this many units is reported as low.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(rename = "costoUnitario", default)]
    pub unit_cost: f64,
}

impl InventoryItem {
    pub fn stock_level(&self) -> &'static str {
        if self.stock <= 0 {
            "agotado"
        } else if self.stock < LOW_STOCK_THRESHOLD {
            "bajo"
        } else {
            "disponible"
        }
    }

    pub fn stock_value(&self) -> f64 {
        self.stock.max(0) as f64 * self.unit_cost
    }
}

impl Listable for InventoryItem {
    const SEARCHABLE: &'static [&'static str] = &[fields::NAME, fields::CATEGORY, fields::ID];

    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            fields::ID => self.id.as_str().into(),
            fields::NAME => self.name.as_str().into(),
            fields::CATEGORY => self.category.as_str().into(),
            fields::STOCK => self.stock.into(),
            fields::UNIT_COST => self.unit_cost.into(),
            fields::STOCK_LEVEL => self.stock_level().into(),
            _ => FieldValue::Missing,
        }
    }
}

//! Sales ("ventas") and their line items.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::record::Listable;
use crate::value::FieldValue;

/// Document keys of a stored sale.
pub mod fields {
    pub const ID: &str = "id";
    pub const DATE: &str = "fecha";
    pub const CLIENT: &str = "clienteId";
    pub const QUANTITY: &str = "cantidad";
    pub const SALE_PRICE: &str = "precioVenta";
    pub const STATUS: &str = "estatus";
    pub const AMOUNT_PAID: &str = "montoPagado";
    pub const FREIGHT: &str = "flete";
    pub const VAULT_ALLOCATION: &str = "bovedaMonte";
    pub const PROFIT: &str = "utilidad";
    pub const PRODUCT: &str = "productoId";
}

/// Payment status of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SaleStatus {
    #[serde(rename = "Pagado")]
    Paid,
    #[default]
    #[serde(rename = "Pendiente")]
    Pending,
}

impl SaleStatus {
    /// Label stored in documents and matched by status filters.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Pagado",
            Self::Pending => "Pendiente",
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SaleStatus {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "pagado" | "paid" => Ok(Self::Paid),
            // "abonado" (partially paid) still has an outstanding balance
            "pendiente" | "pending" | "abonado" | "parcial" => Ok(Self::Pending),
            _ => Err(ModelError::UnknownStatus(value.to_string())),
        }
    }
}

/// One product line of a sale: units shipped at a unit purchase cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "cpUnit")]
    pub unit_cost: f64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

impl LineItem {
    pub fn new(unit_cost: f64, quantity: u32) -> Self {
        Self {
            unit_cost: sanitize_amount(unit_cost),
            quantity,
        }
    }

    /// Build a line item from raw form input, coercing invalid numbers to 0.
    pub fn from_raw(unit_cost: f64, quantity: f64) -> Self {
        let quantity = sanitize_amount(quantity).trunc();
        let quantity = if quantity > f64::from(u32::MAX) {
            u32::MAX
        } else {
            quantity as u32
        };
        Self::new(unit_cost, quantity)
    }

    pub fn subtotal(&self) -> f64 {
        self.unit_cost * f64::from(self.quantity)
    }
}

/// Coerce NaN, infinities, and negative amounts to zero.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// A recorded sale with its FL/BM/UT split persisted alongside it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "clienteId")]
    pub client: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "productos", default)]
    pub line_items: Vec<LineItem>,
    /// Inventory item the shipped units are drawn from.
    #[serde(rename = "productoId", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(rename = "precioVenta")]
    pub sale_price: f64,
    #[serde(rename = "estatus")]
    pub status: SaleStatus,
    #[serde(rename = "montoPagado", default)]
    pub amount_paid: f64,
    #[serde(rename = "flete", default)]
    pub freight: f64,
    #[serde(rename = "bovedaMonte", default)]
    pub vault_allocation: f64,
    #[serde(rename = "utilidad", default)]
    pub profit: f64,
}

impl Sale {
    /// Units across all line items.
    pub fn line_item_units(&self) -> u64 {
        self.line_items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Units the sale ships: the line-item units when there are line items,
    /// otherwise the declared quantity.
    pub fn shipped_units(&self) -> u64 {
        if self.line_items.is_empty() {
            u64::from(self.quantity)
        } else {
            self.line_item_units()
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == SaleStatus::Paid
    }
}

impl Listable for Sale {
    const SEARCHABLE: &'static [&'static str] = &[fields::CLIENT, fields::ID];

    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            fields::ID => self.id.as_str().into(),
            fields::DATE => self.date.into(),
            fields::CLIENT => self.client.as_str().into(),
            fields::QUANTITY => self.quantity.into(),
            fields::SALE_PRICE => self.sale_price.into(),
            fields::STATUS => self.status.label().into(),
            fields::AMOUNT_PAID => self.amount_paid.into(),
            fields::FREIGHT => self.freight.into(),
            fields::VAULT_ALLOCATION => self.vault_allocation.into(),
            fields::PROFIT => self.profit.into(),
            fields::PRODUCT => self.product.as_deref().map_or(FieldValue::Missing, Into::into),
            _ => FieldValue::Missing,
        }
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.date
    }
}

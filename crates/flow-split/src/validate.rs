//! Sale form checks. Errors mark incomplete input; warnings are reported
//! alongside the form and never block saving.

use serde::Serialize;
use thiserror::Error;

use flow_model::Sale;

use crate::calculator::SplitCalculator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum IssueSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum SaleIssue {
    #[error("client is required")]
    MissingClient,
    #[error("sale must ship at least one unit")]
    NoUnits,
    #[error("sale price must be greater than zero")]
    NoSalePrice,
    #[error("sale records a loss of {loss:.2}")]
    Loss { loss: f64 },
    #[error("declared quantity {declared} differs from line-item units {line_items}")]
    UnitMismatch { declared: u32, line_items: u64 },
    #[error("stored {field} {stored:.2} differs from computed {expected:.2}")]
    StoredSplitMismatch {
        field: &'static str,
        stored: f64,
        expected: f64,
    },
    #[error("amount paid {paid:.2} exceeds sale price {price:.2}")]
    Overpaid { paid: f64, price: f64 },
}

impl SaleIssue {
    pub fn severity(&self) -> IssueSeverity {
        match self {
            Self::MissingClient | Self::NoUnits | Self::NoSalePrice => IssueSeverity::Error,
            Self::Loss { .. }
            | Self::UnitMismatch { .. }
            | Self::StoredSplitMismatch { .. }
            | Self::Overpaid { .. } => IssueSeverity::Warning,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaleValidation {
    pub issues: Vec<SaleIssue>,
}

impl SaleValidation {
    /// No errors; warnings are allowed.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &SaleIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == IssueSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &SaleIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == IssueSeverity::Warning)
    }
}

/// Check a sale as entered, comparing any stored split with a fresh one.
pub fn validate_sale(sale: &Sale, calculator: &SplitCalculator) -> SaleValidation {
    let mut issues = Vec::new();
    if sale.client.trim().is_empty() {
        issues.push(SaleIssue::MissingClient);
    }
    let line_item_units = sale.line_item_units();
    if sale.quantity == 0 && line_item_units == 0 {
        issues.push(SaleIssue::NoUnits);
    }
    if !(sale.sale_price.is_finite() && sale.sale_price > 0.0) {
        issues.push(SaleIssue::NoSalePrice);
    }
    if !sale.line_items.is_empty()
        && sale.quantity != 0
        && u64::from(sale.quantity) != line_item_units
    {
        issues.push(SaleIssue::UnitMismatch {
            declared: sale.quantity,
            line_items: line_item_units,
        });
    }

    let split = calculator.split_sale(sale);
    if split.is_loss() {
        issues.push(SaleIssue::Loss {
            loss: -split.profit,
        });
    }
    let stored = [
        ("freight", sale.freight, split.freight),
        ("vault allocation", sale.vault_allocation, split.vault_allocation),
        ("profit", sale.profit, split.profit),
    ];
    let has_stored_split = stored.iter().any(|(_, value, _)| *value != 0.0);
    if has_stored_split {
        for (field, stored, expected) in stored {
            if (stored - expected).abs() >= calculator.tolerance() {
                issues.push(SaleIssue::StoredSplitMismatch {
                    field,
                    stored,
                    expected,
                });
            }
        }
    }
    if sale.amount_paid > sale.sale_price && sale.sale_price > 0.0 {
        issues.push(SaleIssue::Overpaid {
            paid: sale.amount_paid,
            price: sale.sale_price,
        });
    }
    SaleValidation { issues }
}

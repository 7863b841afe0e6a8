use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use flow_model::sale::sanitize_amount;
use flow_model::{DEFAULT_TOLERANCE, LineItem, Sale, SplitConfig};

/// Freight for `total_units` shipped units at `rate_per_unit`.
///
/// Negative unit counts are a caller error and are clamped to zero units, so
/// the result is never negative.
pub fn compute_freight(total_units: i64, rate_per_unit: f64) -> f64 {
    if total_units < 0 {
        warn!(total_units, "negative unit count clamped to zero");
        return 0.0;
    }
    total_units as f64 * sanitize_amount(rate_per_unit)
}

/// Sum of `unit_cost × quantity` over all line items; zero when empty.
pub fn compute_vault_allocation(line_items: &[LineItem]) -> f64 {
    line_items
        .iter()
        .map(|item| sanitize_amount(item.unit_cost) * f64::from(item.quantity))
        .sum()
}

/// The residual left after freight and vault allocation. Negative means a loss.
pub fn compute_profit(sale_price: f64, freight: f64, vault_allocation: f64) -> f64 {
    sanitize_amount(sale_price) - sanitize_amount(freight) - sanitize_amount(vault_allocation)
}

/// True iff FL + BM + UT is within `tolerance` of the sale price.
pub fn verify_split(
    freight: f64,
    vault_allocation: f64,
    profit: f64,
    sale_price: f64,
    tolerance: f64,
) -> bool {
    (freight + vault_allocation + profit - sale_price).abs() < tolerance
}

/// Outcome of checking FL + BM + UT against the sale price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reconciliation {
    Balanced,
    /// `delta` is FL + BM + UT minus the sale price.
    Discrepancy { delta: f64 },
}

impl Reconciliation {
    pub fn check(
        freight: f64,
        vault_allocation: f64,
        profit: f64,
        sale_price: f64,
        tolerance: f64,
    ) -> Self {
        if verify_split(freight, vault_allocation, profit, sale_price, tolerance) {
            Self::Balanced
        } else {
            Self::Discrepancy {
                delta: freight + vault_allocation + profit - sale_price,
            }
        }
    }

    pub fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Balanced => "✓ Correcto",
            Self::Discrepancy { .. } => "⚠ Discrepancia",
        }
    }
}

impl fmt::Display for Reconciliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three buckets of one sale together with their reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SaleSplit {
    pub sale_price: f64,
    pub freight: f64,
    pub vault_allocation: f64,
    pub profit: f64,
    pub reconciliation: Reconciliation,
}

impl SaleSplit {
    /// Negative profit. Reported to the user, never blocks saving.
    pub fn is_loss(&self) -> bool {
        self.profit < 0.0
    }

    /// Profit as a percentage of the sale price; zero for a zero price.
    pub fn margin_percentage(&self) -> f64 {
        if self.sale_price > 0.0 {
            self.profit / self.sale_price * 100.0
        } else {
            0.0
        }
    }

    /// Copy the computed buckets into a sale about to be persisted.
    pub fn apply_to(&self, sale: &mut Sale) {
        sale.freight = self.freight;
        sale.vault_allocation = self.vault_allocation;
        sale.profit = self.profit;
    }
}

/// Split calculator bound to a freight rate and reconciliation tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SplitCalculator {
    config: SplitConfig,
}

impl SplitCalculator {
    pub fn new(config: SplitConfig) -> Self {
        let tolerance = if config.tolerance.is_finite() && config.tolerance > 0.0 {
            config.tolerance
        } else {
            DEFAULT_TOLERANCE
        };
        Self {
            config: SplitConfig {
                freight_rate_per_unit: sanitize_amount(config.freight_rate_per_unit),
                tolerance,
            },
        }
    }

    pub fn config(&self) -> SplitConfig {
        self.config
    }

    pub fn freight_rate(&self) -> f64 {
        self.config.freight_rate_per_unit
    }

    pub fn tolerance(&self) -> f64 {
        self.config.tolerance
    }

    pub fn compute_freight(&self, total_units: i64) -> f64 {
        compute_freight(total_units, self.config.freight_rate_per_unit)
    }

    pub fn compute_vault_allocation(&self, line_items: &[LineItem]) -> f64 {
        compute_vault_allocation(line_items)
    }

    pub fn compute_profit(&self, sale_price: f64, freight: f64, vault_allocation: f64) -> f64 {
        compute_profit(sale_price, freight, vault_allocation)
    }

    pub fn verify_split(
        &self,
        freight: f64,
        vault_allocation: f64,
        profit: f64,
        sale_price: f64,
    ) -> bool {
        verify_split(
            freight,
            vault_allocation,
            profit,
            sale_price,
            self.config.tolerance,
        )
    }

    /// Run freight, vault allocation, and profit in sequence and reconcile.
    pub fn split(&self, total_units: i64, line_items: &[LineItem], sale_price: f64) -> SaleSplit {
        let sale_price = sanitize_amount(sale_price);
        let freight = self.compute_freight(total_units);
        let vault_allocation = self.compute_vault_allocation(line_items);
        let profit = self.compute_profit(sale_price, freight, vault_allocation);
        let reconciliation = Reconciliation::check(
            freight,
            vault_allocation,
            profit,
            sale_price,
            self.config.tolerance,
        );
        debug!(
            total_units,
            sale_price, freight, vault_allocation, profit, "sale split computed"
        );
        SaleSplit {
            sale_price,
            freight,
            vault_allocation,
            profit,
            reconciliation,
        }
    }

    /// Split a sale. Freight is charged on the line-item units when the sale
    /// has line items, otherwise on the sale's declared quantity.
    pub fn split_sale(&self, sale: &Sale) -> SaleSplit {
        let units = i64::try_from(sale.shipped_units()).unwrap_or(i64::MAX);
        self.split(units, &sale.line_items, sale.sale_price)
    }

    /// Reconcile the buckets persisted on a sale, without recomputing them.
    pub fn reconcile_stored(&self, sale: &Sale) -> Reconciliation {
        Reconciliation::check(
            sale.freight,
            sale.vault_allocation,
            sale.profit,
            sale.sale_price,
            self.config.tolerance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_is_coerced() {
        let calculator = SplitCalculator::new(SplitConfig {
            freight_rate_per_unit: f64::NAN,
            tolerance: -1.0,
        });
        assert_eq!(calculator.freight_rate(), 0.0);
        assert_eq!(calculator.tolerance(), DEFAULT_TOLERANCE);
    }

    #[test]
    fn discrepancy_reports_signed_delta() {
        let reconciliation = Reconciliation::check(100.0, 200.0, 300.0, 650.0, 0.01);
        assert_eq!(reconciliation, Reconciliation::Discrepancy { delta: -50.0 });
    }
}

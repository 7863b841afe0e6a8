//! FL/BM/UT sale decomposition.
//!
//! A sale price splits into freight (FL, a flat rate per shipped unit), the
//! vault allocation (BM, the purchase cost of the line items returned to
//! Bóveda Monte), and profit (UT, the residual). All functions here are pure
//! and total: invalid numeric input is coerced to zero rather than rejected.

pub mod calculator;
pub mod entries;
pub mod payment;
pub mod validate;

pub use calculator::{
    Reconciliation, SaleSplit, SplitCalculator, compute_freight, compute_profit,
    compute_vault_allocation, verify_split,
};
pub use entries::{BOVEDA_MONTE, FLETE_SUR, UTILIDADES, accounting_entries};
pub use payment::{PaymentProgress, outstanding_debt, payment_progress};
pub use validate::{IssueSeverity, SaleIssue, SaleValidation, validate_sale};

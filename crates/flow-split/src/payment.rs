use std::fmt;

use serde::Serialize;

use flow_model::SaleStatus;
use flow_model::sale::sanitize_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentProgress {
    Pending,
    Partial,
    Paid,
}

impl PaymentProgress {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Partial => "Parcial",
            Self::Paid => "Pagado",
        }
    }

    /// Stored status; a partial payment still leaves the sale pending.
    pub fn status(&self) -> SaleStatus {
        match self {
            Self::Paid => SaleStatus::Paid,
            Self::Pending | Self::Partial => SaleStatus::Pending,
        }
    }
}

impl fmt::Display for PaymentProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn payment_progress(sale_price: f64, amount_paid: f64) -> PaymentProgress {
    let paid = sanitize_amount(amount_paid);
    if paid == 0.0 {
        PaymentProgress::Pending
    } else if paid >= sanitize_amount(sale_price) {
        PaymentProgress::Paid
    } else {
        PaymentProgress::Partial
    }
}

/// What the client still owes on a sale; never negative.
pub fn outstanding_debt(sale_price: f64, amount_paid: f64) -> f64 {
    (sanitize_amount(sale_price) - sanitize_amount(amount_paid)).max(0.0)
}

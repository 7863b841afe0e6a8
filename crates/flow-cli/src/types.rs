use serde::Serialize;
use serde_json::Value;

use flow_model::LineItem;
use flow_query::{ClientTotals, GroupSum, InventoryTotals, LedgerTotals, SaleTotals};
use flow_split::SaleSplit;

/// One summary figure shown under a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub label: &'static str,
    pub value: KpiValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KpiValue {
    Count(u64),
    Money(f64),
    Percent(f64),
}

/// Aggregates that can be listed as KPIs.
pub trait Kpis {
    fn kpis(&self) -> Vec<Kpi>;
}

fn count(label: &'static str, value: usize) -> Kpi {
    Kpi {
        label,
        value: KpiValue::Count(value as u64),
    }
}

fn money(label: &'static str, value: f64) -> Kpi {
    Kpi {
        label,
        value: KpiValue::Money(value),
    }
}

impl Kpis for () {
    fn kpis(&self) -> Vec<Kpi> {
        Vec::new()
    }
}

impl Kpis for SaleTotals {
    fn kpis(&self) -> Vec<Kpi> {
        vec![
            count("Sales", self.count),
            count("Paid", self.paid_count),
            count("Pending", self.pending_count),
            Kpi {
                label: "Units",
                value: KpiValue::Count(self.units),
            },
            money("Revenue", self.revenue),
            money("Freight (FL)", self.freight),
            money("Vault allocation (BM)", self.vault_allocation),
            money("Profit (UT)", self.profit),
            Kpi {
                label: "Margin",
                value: KpiValue::Percent(self.profit_margin()),
            },
            money("Receivable", self.receivable),
        ]
    }
}

impl Kpis for ClientTotals {
    fn kpis(&self) -> Vec<Kpi> {
        vec![
            count("Clients", self.count),
            count("Active", self.active),
            count("With debt", self.with_debt),
            money("Total debt", self.total_debt),
        ]
    }
}

impl Kpis for InventoryTotals {
    fn kpis(&self) -> Vec<Kpi> {
        vec![
            count("Products", self.count),
            Kpi {
                label: "Units in stock",
                value: KpiValue::Count(self.units.max(0).unsigned_abs()),
            },
            money("Stock value", self.stock_value),
            count("Low or out of stock", self.low_stock),
        ]
    }
}

impl Kpis for LedgerTotals {
    fn kpis(&self) -> Vec<Kpi> {
        vec![
            count("Entries", self.count),
            money("Income", self.income),
            money("Payments", self.payments),
            money("Expense", self.expense),
            money("Transfers", self.transfers),
            money("Balance", self.balance),
        ]
    }
}

/// One page of a list query, ready to print.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub collection: String,
    /// 1-based page number actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub rows: Vec<Value>,
    pub aggregate: Vec<Kpi>,
    #[serde(skip)]
    pub columns: Vec<String>,
    #[serde(skip)]
    pub cells: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub units: i64,
    pub freight_rate: f64,
    pub line_items: Vec<LineItem>,
    pub split: SaleSplit,
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerReport {
    pub group_by: String,
    pub totals: LedgerTotals,
    pub groups: Vec<GroupSum>,
}

//! Summary KPIs computed over the filtered (not paginated) rows.

use std::collections::BTreeMap;

use serde::Serialize;

use flow_model::{Client, EntryKind, InventoryItem, LedgerEntry, Listable, Sale};

/// Label used for rows whose grouping field is empty.
pub const UNCATEGORIZED_LABEL: &str = "Sin categoría";

/// A summary derived from a set of rows.
pub trait Aggregate<T>: Sized {
    fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a;
}

/// No summary; for views that only need the page.
impl<T> Aggregate<T> for () {
    fn from_rows<'a, I>(_rows: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
    }
}

/// GYA totals: `balance = income + payments - expense`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LedgerTotals {
    pub count: usize,
    pub income: f64,
    pub payments: f64,
    pub expense: f64,
    pub transfers: f64,
    pub balance: f64,
}

impl Aggregate<LedgerEntry> for LedgerTotals {
    fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let mut totals = Self::default();
        for entry in rows {
            let amount = finite(entry.amount);
            totals.count += 1;
            match entry.kind {
                EntryKind::Income => totals.income += amount,
                EntryKind::Payment => totals.payments += amount,
                EntryKind::Expense => totals.expense += amount,
                EntryKind::Transfer => totals.transfers += amount,
            }
        }
        totals.balance = totals.income + totals.payments - totals.expense;
        totals
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SaleTotals {
    pub count: usize,
    pub paid_count: usize,
    pub pending_count: usize,
    pub units: u64,
    pub revenue: f64,
    pub freight: f64,
    pub vault_allocation: f64,
    pub profit: f64,
    /// Outstanding balance across pending sales.
    pub receivable: f64,
}

impl SaleTotals {
    pub fn average_sale(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.revenue / self.count as f64
        }
    }

    pub fn profit_margin(&self) -> f64 {
        if self.revenue > 0.0 {
            self.profit / self.revenue * 100.0
        } else {
            0.0
        }
    }
}

impl Aggregate<Sale> for SaleTotals {
    fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Sale>,
    {
        let mut totals = Self::default();
        for sale in rows {
            let price = finite(sale.sale_price);
            totals.count += 1;
            totals.units += u64::from(sale.quantity);
            totals.revenue += price;
            totals.freight += finite(sale.freight);
            totals.vault_allocation += finite(sale.vault_allocation);
            totals.profit += finite(sale.profit);
            if sale.is_paid() {
                totals.paid_count += 1;
            } else {
                totals.pending_count += 1;
                totals.receivable += (price - finite(sale.amount_paid)).max(0.0);
            }
        }
        totals
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClientTotals {
    pub count: usize,
    pub active: usize,
    pub with_debt: usize,
    pub total_debt: f64,
}

impl Aggregate<Client> for ClientTotals {
    fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Client>,
    {
        let mut totals = Self::default();
        for client in rows {
            totals.count += 1;
            if client.active {
                totals.active += 1;
            }
            if client.has_debt() {
                totals.with_debt += 1;
                totals.total_debt += finite(client.debt);
            }
        }
        totals
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct InventoryTotals {
    pub count: usize,
    pub units: i64,
    pub stock_value: f64,
    pub low_stock: usize,
}

impl Aggregate<InventoryItem> for InventoryTotals {
    fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a InventoryItem>,
    {
        let mut totals = Self::default();
        for item in rows {
            totals.count += 1;
            totals.units = totals.units.saturating_add(item.stock.max(0));
            totals.stock_value += finite(item.stock_value());
            if item.stock_level() != "disponible" {
                totals.low_stock += 1;
            }
        }
        totals
    }
}

/// Sum of one field per distinct value of another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSum {
    pub key: String,
    pub count: usize,
    pub total: f64,
}

/// Group `rows` by `group_field` and sum `value_field`, largest total first.
///
/// Ties keep the alphabetical order of their keys.
pub fn group_sums<'a, T, I>(rows: I, group_field: &str, value_field: &str) -> Vec<GroupSum>
where
    T: Listable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut groups: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    for row in rows {
        let key = row.field(group_field).text().trim().to_string();
        let key = if key.is_empty() {
            UNCATEGORIZED_LABEL.to_string()
        } else {
            key
        };
        let slot = groups.entry(key).or_default();
        slot.0 += 1;
        slot.1 += row.field(value_field).number();
    }
    let mut sums: Vec<GroupSum> = groups
        .into_iter()
        .map(|(key, (count, total))| GroupSum { key, count, total })
        .collect();
    sums.sort_by(|a, b| b.total.total_cmp(&a.total));
    sums
}

fn finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

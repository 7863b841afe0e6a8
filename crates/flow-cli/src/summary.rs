//! Terminal rendering of command results.

use anyhow::{Context, Result};
use clap::ColorChoice;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use flow_model::VaultCut;
use flow_split::Reconciliation;

use crate::types::{Kpi, KpiValue, Kpis, LedgerReport, QueryReport, SplitReport};

/// Columns holding currency amounts, right-aligned and formatted as money.
const MONEY_COLUMNS: &[&str] = &[
    "precioVenta",
    "montoPagado",
    "flete",
    "bovedaMonte",
    "utilidad",
    "adeudo",
    "limiteCredito",
    "costoUnitario",
    "monto",
    "capitalActual",
];

pub fn print_query(report: &QueryReport, color: ColorChoice) {
    println!("{}", query_table(report, color));
    println!("{}", page_status(report));
    if !report.aggregate.is_empty() {
        println!("{}", kpi_table(&report.aggregate, color));
    }
}

pub fn print_query_json(report: &QueryReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize query result")?;
    println!("{json}");
    Ok(())
}

pub fn print_split(report: &SplitReport, color: ColorChoice) {
    println!("{}", split_table(report, color));
}

pub fn print_cut(cut: &VaultCut, color: ColorChoice) {
    println!("{}", cut_table(cut, color));
}

pub fn print_ledger(report: &LedgerReport, color: ColorChoice) {
    println!("{}", kpi_table(&report.totals.kpis(), color));
    println!("{}", group_table(report, color));
}

pub fn query_table(report: &QueryReport, color: ColorChoice) -> Table {
    let mut table = Table::new();
    table.set_header(report.columns.iter().map(|c| header_cell(c)));
    apply_table_style(&mut table, color);
    for (idx, column) in report.columns.iter().enumerate() {
        if MONEY_COLUMNS.contains(&column.as_str()) {
            align_column(&mut table, idx, CellAlignment::Right);
        }
    }
    for row in &report.cells {
        table.add_row(row.iter().zip(&report.columns).map(|(value, column)| {
            if MONEY_COLUMNS.contains(&column.as_str()) {
                value
                    .parse::<f64>()
                    .map_or_else(|_| Cell::new(value), money_cell)
            } else if value.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(value)
            }
        }));
    }
    table
}

/// `page 2 of 3 (23 rows)`, or `no matching rows`.
pub fn page_status(report: &QueryReport) -> String {
    if report.total_count == 0 {
        return format!("{}: no matching rows", report.collection);
    }
    format!(
        "{}: page {} of {} ({} rows)",
        report.collection, report.page, report.total_pages, report.total_count
    )
}

pub fn kpi_table(kpis: &[Kpi], color: ColorChoice) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table, color);
    align_column(&mut table, 1, CellAlignment::Right);
    for kpi in kpis {
        let value = match kpi.value {
            KpiValue::Count(count) => Cell::new(count),
            KpiValue::Money(amount) => money_cell(amount),
            KpiValue::Percent(pct) => Cell::new(format!("{pct:.2}%")),
        };
        table.add_row(vec![Cell::new(kpi.label), value]);
    }
    table
}

pub fn split_table(report: &SplitReport, color: ColorChoice) -> Table {
    let split = &report.split;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Bucket"), header_cell("Amount")]);
    apply_summary_style(&mut table, color);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Sale price"), money_cell(split.sale_price)]);
    table.add_row(vec![
        Cell::new(format!(
            "Freight FL ({} u × {})",
            report.units,
            format_money(report.freight_rate)
        )),
        money_cell(split.freight),
    ]);
    table.add_row(vec![
        Cell::new(format!("Vault allocation BM ({} items)", report.line_items.len())),
        money_cell(split.vault_allocation),
    ]);
    table.add_row(vec![
        Cell::new("Profit UT").add_attribute(Attribute::Bold),
        money_cell(split.profit).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Margin"),
        Cell::new(format!("{:.2}%", split.margin_percentage())),
    ]);
    table.add_row(vec![
        Cell::new("Check"),
        reconciliation_cell(split.reconciliation),
    ]);
    table
}

pub fn cut_table(cut: &VaultCut, color: ColorChoice) -> Table {
    let mut table = Table::new();
    let title = match cut.as_of {
        Some(date) => format!("{} as of {date}", cut.vault),
        None => cut.vault.clone(),
    };
    table.set_header(vec![header_cell(&title), header_cell("Amount")]);
    apply_summary_style(&mut table, color);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Income"), money_cell(cut.income)]);
    table.add_row(vec![Cell::new("Expense"), money_cell(-cut.expense)]);
    table.add_row(vec![Cell::new("Transfers in"), money_cell(cut.transfers_in)]);
    table.add_row(vec![
        Cell::new("Transfers out"),
        money_cell(-cut.transfers_out),
    ]);
    table.add_row(vec![
        Cell::new(format!("Balance ({} movements)", cut.entry_count))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        money_cell(cut.balance).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn group_table(report: &LedgerReport, color: ColorChoice) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(&report.group_by),
        header_cell("Entries"),
        header_cell("Total"),
    ]);
    apply_table_style(&mut table, color);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for group in &report.groups {
        table.add_row(vec![
            Cell::new(&group.key),
            Cell::new(group.count),
            money_cell(group.total),
        ]);
    }
    table
}

/// `$1,234.50`, with a leading minus for negative amounts.
pub fn format_money(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

fn reconciliation_cell(reconciliation: Reconciliation) -> Cell {
    let color = if reconciliation.is_balanced() {
        Color::Green
    } else {
        Color::Yellow
    };
    Cell::new(reconciliation.label())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn money_cell(amount: f64) -> Cell {
    let cell = Cell::new(format_money(amount));
    if amount < 0.0 { cell.fg(Color::Red) } else { cell }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn apply_color_choice(table: &mut Table, color: ColorChoice) {
    match color {
        ColorChoice::Always => {
            table.enforce_styling();
        }
        ColorChoice::Never => {
            table.force_no_tty();
        }
        ColorChoice::Auto => {}
    }
}

pub fn apply_table_style(table: &mut Table, color: ColorChoice) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    apply_color_choice(table, color);
}

fn apply_summary_style(table: &mut Table, color: ColorChoice) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    apply_color_choice(table, color);
}

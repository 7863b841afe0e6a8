use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail, ensure};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, info_span, warn};

use flow_core::{FlowConfig, ViewState, cut_vault};
use flow_ingest::{collection_for_path, load_collection, load_records, load_snapshot};
use flow_model::{
    Client, Collection, DateRange, InventoryItem, LedgerEntry, LineItem, Listable, Record, Sale,
    SortState, Transfer, Vault, VaultCut, parse_date, parse_filter,
};
use flow_query::{
    Aggregate, ClientTotals, InventoryTotals, LedgerTotals, QueryPipeline, SaleTotals, group_sums,
};
use flow_split::{Reconciliation, SplitCalculator};

use crate::cli::{CutArgs, LedgerArgs, QueryArgs, SplitArgs};
use crate::types::{Kpis, LedgerReport, QueryReport, SplitReport};

const SALE_COLUMNS: &[&str] = &[
    "id",
    "fecha",
    "clienteId",
    "cantidad",
    "precioVenta",
    "flete",
    "bovedaMonte",
    "utilidad",
    "estatus",
];
const CLIENT_COLUMNS: &[&str] = &["id", "nombre", "telefono", "adeudo", "estadoAdeudo", "activo"];
const INVENTORY_COLUMNS: &[&str] = &[
    "id",
    "nombre",
    "categoria",
    "stock",
    "costoUnitario",
    "nivelStock",
];
const TRANSFER_COLUMNS: &[&str] = &["id", "fecha", "origen", "destino", "monto", "concepto"];
const LEDGER_COLUMNS: &[&str] = &[
    "id",
    "fecha",
    "tipo",
    "destino",
    "concepto",
    "categoria",
    "monto",
];
const VAULT_COLUMNS: &[&str] = &["id", "nombre", "capitalActual"];

pub fn run_query(args: &QueryArgs, config: &FlowConfig) -> Result<QueryReport> {
    let span = info_span!("query", file = %args.file.display());
    let _guard = span.enter();
    let start = Instant::now();

    let collection = match &args.collection {
        Some(name) => Some(
            name.parse::<Collection>()
                .with_context(|| format!("unknown --collection {name:?}"))?,
        ),
        None => collection_for_path(&args.file),
    };

    let report = match collection {
        Some(collection) => {
            let snapshot = load_collection(&args.file, collection)
                .with_context(|| format!("load {}", args.file.display()))?;
            let name = collection.document_name();
            match collection {
                Collection::Sales => {
                    query_typed::<Sale, SaleTotals>(&snapshot.sales, name, SALE_COLUMNS, args, config)?
                }
                Collection::Clients => query_typed::<Client, ClientTotals>(
                    &snapshot.clients,
                    name,
                    CLIENT_COLUMNS,
                    args,
                    config,
                )?,
                Collection::Inventory => query_typed::<InventoryItem, InventoryTotals>(
                    &snapshot.inventory,
                    name,
                    INVENTORY_COLUMNS,
                    args,
                    config,
                )?,
                Collection::Transfers => query_typed::<Transfer, ()>(
                    &snapshot.transfers,
                    name,
                    TRANSFER_COLUMNS,
                    args,
                    config,
                )?,
                Collection::Ledger => query_typed::<LedgerEntry, LedgerTotals>(
                    &snapshot.ledger,
                    name,
                    LEDGER_COLUMNS,
                    args,
                    config,
                )?,
                Collection::Vaults => {
                    query_typed::<Vault, ()>(&snapshot.vaults, name, VAULT_COLUMNS, args, config)?
                }
            }
        }
        None => {
            let records = load_records(&args.file)
                .with_context(|| format!("load {}", args.file.display()))?;
            query_records(&records, args, config)?
        }
    };

    info!(
        collection = %report.collection,
        matched = report.total_count,
        page = report.page,
        duration_ms = start.elapsed().as_millis(),
        "query finished"
    );
    Ok(report)
}

fn query_typed<T, A>(
    records: &[T],
    name: &str,
    columns: &[&str],
    args: &QueryArgs,
    config: &FlowConfig,
) -> Result<QueryReport>
where
    T: Listable + Serialize,
    A: Aggregate<T> + Kpis,
{
    let columns: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
    build_report::<T, A>(
        records,
        QueryPipeline::for_listable::<T>(),
        name,
        columns,
        args,
        config,
    )
}

/// Files that match no collection: every field is searchable and shown.
fn query_records(records: &[Record], args: &QueryArgs, config: &FlowConfig) -> Result<QueryReport> {
    let fields: BTreeSet<&str> = records.iter().flat_map(Record::field_names).collect();
    let pipeline = QueryPipeline::with_search_fields(fields.iter().copied());
    let columns = std::iter::once("id".to_string())
        .chain(fields.iter().map(|f| (*f).to_string()))
        .collect();
    let name = args
        .file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("records");
    build_report::<Record, ()>(records, pipeline, name, columns, args, config)
}

fn build_report<T, A>(
    records: &[T],
    pipeline: QueryPipeline,
    name: &str,
    columns: Vec<String>,
    args: &QueryArgs,
    config: &FlowConfig,
) -> Result<QueryReport>
where
    T: Listable + Serialize,
    A: Aggregate<T> + Kpis,
{
    let mut view = ViewState::new(pipeline, &config.views);
    configure_view(&mut view, args)?;
    let derived = view.derive_with::<T, A>(records);
    view.sync(derived.result.window());

    let page = derived.result.page();
    let cells = page
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| row.field(column).text().into_owned())
                .collect()
        })
        .collect();
    let rows = page
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .context("serialize rows")?;

    Ok(QueryReport {
        collection: name.to_string(),
        page: view.page.page_index + 1,
        total_pages: derived.result.total_pages(),
        page_size: view.page.page_size,
        total_count: derived.result.total_count(),
        rows,
        aggregate: derived.aggregate.kpis(),
        columns,
        cells,
    })
}

fn configure_view(view: &mut ViewState, args: &QueryArgs) -> Result<()> {
    if let Some(size) = args.page_size {
        ensure!(size > 0, "--page-size must be at least 1");
        view.set_page_size(size);
    }
    if let Some(term) = &args.search {
        view.set_search(term.as_str());
    }
    for expr in &args.filters {
        let (field, filter) =
            parse_filter(expr).with_context(|| format!("invalid --filter {expr:?}"))?;
        view.set_filter(field, filter);
    }
    let from = args.from.as_deref().map(parse_cli_date).transpose()?;
    let to = args.to.as_deref().map(parse_cli_date).transpose()?;
    if from.is_some() || to.is_some() {
        if let (Some(from), Some(to)) = (from, to) {
            ensure!(from <= to, "--from {from} is after --to {to}");
        }
        view.set_date_range(Some(DateRange::new(from, to)));
    }
    if let Some(key) = &args.sort {
        view.sort = if args.descending {
            SortState::descending(key.as_str())
        } else {
            SortState::ascending(key.as_str())
        };
    }
    view.go_to_page(args.page.saturating_sub(1));
    Ok(())
}

pub fn parse_cli_date(value: &str) -> Result<NaiveDate> {
    parse_date(value).ok_or_else(|| anyhow!("invalid date {value:?}, expected YYYY-MM-DD"))
}

/// Parse a `UNIT_COST:QUANTITY` line item.
pub fn parse_item(raw: &str) -> Result<LineItem> {
    let (cost, quantity) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("invalid --item {raw:?}, expected COST:QTY"))?;
    let cost: f64 = cost
        .trim()
        .parse()
        .with_context(|| format!("invalid unit cost in --item {raw:?}"))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .with_context(|| format!("invalid quantity in --item {raw:?}"))?;
    ensure!(
        cost.is_finite() && cost >= 0.0,
        "unit cost in --item {raw:?} must be a non-negative number"
    );
    Ok(LineItem::new(cost, quantity))
}

pub fn run_split(args: &SplitArgs, config: &FlowConfig) -> Result<SplitReport> {
    let span = info_span!("split", price = args.price);
    let _guard = span.enter();

    ensure!(
        args.price.is_finite() && args.price >= 0.0,
        "--price must be a non-negative number"
    );
    let line_items = args
        .items
        .iter()
        .map(String::as_str)
        .map(parse_item)
        .collect::<Result<Vec<_>>>()?;

    let mut split_config = config.split;
    if let Some(rate) = args.freight_rate {
        split_config = split_config.with_freight_rate(rate);
        FlowConfig {
            split: split_config,
            ..*config
        }
        .validate()
        .context("invalid --freight-rate")?;
    }
    let calculator = SplitCalculator::new(split_config);

    let units = match args.units {
        Some(units) => units,
        None => line_items
            .iter()
            .map(|item| i64::from(item.quantity))
            .sum(),
    };
    let split = calculator.split(units, &line_items, args.price);
    if let Reconciliation::Discrepancy { delta } = split.reconciliation {
        warn!(delta, "split does not reconcile with the sale price");
    }
    if split.is_loss() {
        warn!(loss = -split.profit, "sale records a loss");
    }

    Ok(SplitReport {
        units,
        freight_rate: calculator.freight_rate(),
        line_items,
        split,
    })
}

pub fn run_cut(args: &CutArgs) -> Result<VaultCut> {
    let span = info_span!("cut", vault = %args.vault);
    let _guard = span.enter();
    let start = Instant::now();

    if !args.dir.is_dir() {
        bail!("{} is not a snapshot directory", args.dir.display());
    }
    let snapshot = load_snapshot(&args.dir)
        .with_context(|| format!("load snapshot {}", args.dir.display()))?;
    let as_of = args.as_of.as_deref().map(parse_cli_date).transpose()?;

    let vault = match snapshot.vaults.iter().find(|v| v.matches(&args.vault)) {
        Some(vault) => vault.name.clone(),
        None => {
            if !snapshot.vaults.is_empty() {
                warn!(vault = %args.vault, "vault not found in snapshot, matching by name");
            }
            args.vault.clone()
        }
    };
    let cut = cut_vault(&snapshot.ledger, &snapshot.transfers, &vault, as_of);
    info!(
        vault = %cut.vault,
        balance = cut.balance,
        duration_ms = start.elapsed().as_millis(),
        "cut finished"
    );
    Ok(cut)
}

pub fn run_ledger(args: &LedgerArgs) -> Result<LedgerReport> {
    let span = info_span!("ledger", file = %args.file.display());
    let _guard = span.enter();

    let snapshot = if args.file.is_dir() {
        load_snapshot(&args.file)
    } else {
        load_collection(&args.file, Collection::Ledger)
    }
    .with_context(|| format!("load {}", args.file.display()))?;

    let totals = LedgerTotals::from_rows(&snapshot.ledger);
    let groups = group_sums(&snapshot.ledger, &args.group_by, "monto");
    info!(entries = totals.count, groups = groups.len(), "ledger summarized");
    Ok(LedgerReport {
        group_by: args.group_by.clone(),
        totals,
        groups,
    })
}

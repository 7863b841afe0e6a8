//! Integration tests for the list query pipeline.

use chrono::NaiveDate;
use flow_model::{
    Client, DateRange, EntryKind, FilterState, InventoryItem, LedgerEntry, PageState, Sale,
    SaleStatus, SortState,
};
use flow_query::{
    Aggregate, ClientTotals, Derived, InventoryTotals, LedgerTotals, QueryPipeline, SaleTotals,
    UNCATEGORIZED_LABEL, group_sums,
};

fn sales() -> Vec<Sale> {
    (0..23u32)
        .map(|i| Sale {
            id: format!("V-{i:03}"),
            client: format!("Cliente {}", i % 4),
            quantity: 1 + i % 5,
            sale_price: 1000.0 + f64::from((i * 7) % 23) * 100.0,
            status: if i % 3 == 0 {
                SaleStatus::Pending
            } else {
                SaleStatus::Paid
            },
            ..Sale::default()
        })
        .collect()
}

fn ids<T: flow_model::Listable>(rows: &[&T]) -> Vec<String> {
    rows.iter().map(|row| row.record_id().to_string()).collect()
}

#[test]
fn paid_sales_by_price_descending_span_two_pages() {
    let sales = sales();
    let pipeline = QueryPipeline::for_listable::<Sale>();
    let filter = FilterState::new().with_filter("estatus", "Pagado");
    let sort = SortState::descending("precioVenta");

    let first = pipeline.query(&sales, &filter, &sort, &PageState::new(10));
    assert_eq!(first.total_count(), 15);
    assert_eq!(first.total_pages(), 2);
    assert_eq!(first.page().len(), 10);

    let mut paid_prices: Vec<f64> = sales
        .iter()
        .filter(|sale| sale.is_paid())
        .map(|sale| sale.sale_price)
        .collect();
    paid_prices.sort_by(|a, b| b.total_cmp(a));
    let page_prices: Vec<f64> = first.page().iter().map(|sale| sale.sale_price).collect();
    assert_eq!(page_prices, paid_prices[..10].to_vec());

    let second = pipeline.query(&sales, &filter, &sort, &PageState::new(10).at(1));
    assert_eq!(second.page().len(), 5);
    let page_prices: Vec<f64> = second.page().iter().map(|sale| sale.sale_price).collect();
    assert_eq!(page_prices, paid_prices[10..].to_vec());
}

#[test]
fn search_is_case_insensitive_substring() {
    let sales = sales();
    let pipeline = QueryPipeline::for_listable::<Sale>();
    let filter = FilterState::new().with_search("CLIENTE 1");
    let result = pipeline.query(&sales, &filter, &SortState::none(), &PageState::new(50));
    assert!(result.total_count() > 0);
    assert!(
        result
            .matched()
            .iter()
            .all(|sale| sale.client == "Cliente 1")
    );

    let by_id = FilterState::new().with_search("v-02");
    let result = pipeline.query(&sales, &by_id, &SortState::none(), &PageState::new(50));
    assert_eq!(ids(result.matched()), vec!["V-020", "V-021", "V-022"]);
}

#[test]
fn empty_search_and_all_filter_pass_through() {
    let sales = sales();
    let pipeline = QueryPipeline::for_listable::<Sale>();
    let filter = FilterState::new()
        .with_search("")
        .with_filter("estatus", "all");
    let result = pipeline.query(&sales, &filter, &SortState::none(), &PageState::new(100));
    assert_eq!(result.total_count(), sales.len());
}

#[test]
fn field_filter_is_exact_not_substring() {
    let sales = sales();
    let pipeline = QueryPipeline::for_listable::<Sale>();
    let filter = FilterState::new().with_filter("estatus", "Pag");
    let result = pipeline.query(&sales, &filter, &SortState::none(), &PageState::new(10));
    assert!(result.is_empty());
    assert_eq!(result.total_pages(), 0);
    assert!(result.page().is_empty());
}

#[test]
fn clearing_filters_restores_source_order() {
    let sales = sales();
    let pipeline = QueryPipeline::for_listable::<Sale>();
    let mut filter = FilterState::new()
        .with_search("cliente 2")
        .with_filter("estatus", "Pendiente");
    let narrowed = pipeline.query(&sales, &filter, &SortState::none(), &PageState::new(100));
    assert!(narrowed.total_count() < sales.len());

    filter.clear();
    let restored = pipeline.query(&sales, &filter, &SortState::none(), &PageState::new(100));
    let source: Vec<String> = sales.iter().map(|sale| sale.id.clone()).collect();
    assert_eq!(ids(restored.matched()), source);
}

#[test]
fn page_index_clamps_after_filter_narrows() {
    let sales = sales();
    let pipeline = QueryPipeline::for_listable::<Sale>();
    let page = PageState::new(10).at(2);

    let all = pipeline.query(&sales, &FilterState::new(), &SortState::none(), &page);
    assert_eq!(all.page_index(), 2);
    assert_eq!(all.page().len(), 3);

    let pending = FilterState::new().with_filter("estatus", "Pendiente");
    let narrowed = pipeline.query(&sales, &pending, &SortState::none(), &page);
    assert_eq!(narrowed.total_count(), 8);
    assert_eq!(narrowed.page_index(), 0);
    assert_eq!(narrowed.page().len(), 8);
}

#[test]
fn query_does_not_touch_source() {
    let sales = sales();
    let before = sales.clone();
    let pipeline = QueryPipeline::for_listable::<Sale>();
    let _ = pipeline.query(
        &sales,
        &FilterState::new().with_search("3"),
        &SortState::descending("precioVenta"),
        &PageState::new(5).at(1),
    );
    assert_eq!(sales, before);
}

fn ledger() -> Vec<LedgerEntry> {
    let entry = |id: &str, day: u32, kind, destination: &str, amount: f64| LedgerEntry {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 3, day),
        kind,
        destination: destination.to_string(),
        origin: None,
        concept: format!("Movimiento {id}"),
        category: None,
        amount,
        reference: None,
    };
    vec![
        entry("G-1", 1, EntryKind::Income, "Bóveda Monte", 10_000.0),
        entry("G-2", 3, EntryKind::Expense, "Flete Sur", 2500.0),
        entry("G-3", 5, EntryKind::Payment, "Bóveda Monte", 1500.0),
        entry("G-4", 9, EntryKind::Expense, "Bóveda USA", 700.0),
        entry("G-5", 12, EntryKind::Transfer, "Bóveda USA", 3000.0),
    ]
}

#[test]
fn ledger_totals_follow_the_filter() {
    let ledger = ledger();
    let pipeline = QueryPipeline::for_listable::<LedgerEntry>();

    let Derived { result, aggregate } = pipeline.query_with::<_, LedgerTotals>(
        &ledger,
        &FilterState::new(),
        &SortState::none(),
        &PageState::new(2),
    );
    assert_eq!(result.page().len(), 2);
    assert_eq!(aggregate.count, 5);
    assert_eq!(aggregate.income, 10_000.0);
    assert_eq!(aggregate.payments, 1500.0);
    assert_eq!(aggregate.expense, 3200.0);
    assert_eq!(aggregate.transfers, 3000.0);
    assert_eq!(aggregate.balance, 8300.0);

    let expenses_only = FilterState::new().with_filter("tipo", "gasto");
    let derived = pipeline.query_with::<_, LedgerTotals>(
        &ledger,
        &expenses_only,
        &SortState::none(),
        &PageState::new(10),
    );
    assert_eq!(derived.result.total_count(), derived.aggregate.count);
    assert_eq!(derived.aggregate.income, 0.0);
    assert_eq!(derived.aggregate.balance, -3200.0);
}

#[test]
fn date_range_excludes_entries_outside_and_undated() {
    let mut ledger = ledger();
    ledger[0].date = None;
    let pipeline = QueryPipeline::for_listable::<LedgerEntry>();
    let range = DateRange::new(NaiveDate::from_ymd_opt(2025, 3, 1), NaiveDate::from_ymd_opt(2025, 3, 9));
    let filter = FilterState::new().with_date_range(range);
    let result = pipeline.query(&ledger, &filter, &SortState::none(), &PageState::new(10));
    assert_eq!(ids(result.matched()), vec!["G-2", "G-3", "G-4"]);
}

#[test]
fn sale_totals_track_receivables() {
    let mut sales = sales();
    sales[0].amount_paid = 400.0;
    let pipeline = QueryPipeline::for_listable::<Sale>();
    let filter = FilterState::new().with_filter("estatus", "Pendiente");
    let derived = pipeline.query_with::<_, SaleTotals>(
        &sales,
        &filter,
        &SortState::none(),
        &PageState::new(10),
    );
    let pending_revenue: f64 = sales
        .iter()
        .filter(|sale| !sale.is_paid())
        .map(|sale| sale.sale_price)
        .sum();
    assert_eq!(derived.aggregate.count, 8);
    assert_eq!(derived.aggregate.pending_count, 8);
    assert_eq!(derived.aggregate.paid_count, 0);
    assert_eq!(derived.aggregate.revenue, pending_revenue);
    assert_eq!(derived.aggregate.receivable, pending_revenue - 400.0);
}

#[test]
fn client_totals_count_debtors() {
    let clients = vec![
        Client {
            id: "C-1".to_string(),
            name: "Ana".to_string(),
            debt: 500.0,
            active: true,
            ..Client::default()
        },
        Client {
            id: "C-2".to_string(),
            name: "Beto".to_string(),
            active: true,
            ..Client::default()
        },
        Client {
            id: "C-3".to_string(),
            name: "Carla".to_string(),
            debt: 250.0,
            ..Client::default()
        },
    ];
    let pipeline = QueryPipeline::for_listable::<Client>();
    let filter = FilterState::new().with_filter("estadoAdeudo", "conAdeudo");
    let derived = pipeline.query_with::<_, ClientTotals>(
        &clients,
        &filter,
        &SortState::ascending("nombre"),
        &PageState::default(),
    );
    assert_eq!(ids(derived.result.page()), vec!["C-1", "C-3"]);
    assert_eq!(derived.aggregate.with_debt, 2);
    assert_eq!(derived.aggregate.active, 1);
    assert_eq!(derived.aggregate.total_debt, 750.0);
}

#[test]
fn group_sums_rank_by_total() {
    let mut ledger = ledger();
    ledger[1].destination = String::new();
    let sums = group_sums(&ledger, "destino", "monto");
    let keys: Vec<&str> = sums.iter().map(|group| group.key.as_str()).collect();
    assert_eq!(keys, vec!["Bóveda Monte", "Bóveda USA", UNCATEGORIZED_LABEL]);
    assert_eq!(sums[0].count, 2);
    assert_eq!(sums[0].total, 11_500.0);
    assert_eq!(sums[1].total, 3700.0);
}

#[test]
fn unsorted_query_keeps_insertion_order_across_pages() {
    let sales = sales();
    let pipeline = QueryPipeline::for_listable::<Sale>();
    let result = pipeline.query(&sales, &FilterState::new(), &SortState::none(), &PageState::new(10));
    let flattened: Vec<String> = result.pages().flat_map(ids).collect();
    let source: Vec<String> = sales.iter().map(|sale| sale.id.clone()).collect();
    assert_eq!(flattened, source);
    insta::assert_snapshot!(format!("{} rows / {} pages", result.total_count(), result.total_pages()), @"23 rows / 3 pages");
}

#[test]
fn inventory_units_saturate_instead_of_overflowing() {
    let items: Vec<InventoryItem> = ["P-1", "P-2", "P-3"]
        .iter()
        .map(|id| InventoryItem {
            id: (*id).to_string(),
            name: (*id).to_string(),
            stock: if *id == "P-3" { -4 } else { i64::MAX },
            ..InventoryItem::default()
        })
        .collect();
    let totals = InventoryTotals::from_rows(&items);
    assert_eq!(totals.count, 3);
    assert_eq!(totals.units, i64::MAX);
    assert_eq!(totals.low_stock, 1);
}

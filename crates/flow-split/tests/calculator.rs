//! Tests for the FL/BM/UT calculator.

use flow_model::{LineItem, Sale, SaleStatus, SplitConfig};
use flow_split::{
    Reconciliation, SplitCalculator, compute_freight, compute_profit, compute_vault_allocation,
    verify_split,
};
use proptest::prelude::*;

#[test]
fn empty_inputs_yield_zero() {
    assert_eq!(compute_vault_allocation(&[]), 0.0);
    assert_eq!(compute_freight(0, 500.0), 0.0);
}

#[test]
fn negative_units_clamp_to_zero_freight() {
    let calculator = SplitCalculator::default();
    assert_eq!(calculator.compute_freight(-4), 0.0);
}

#[test]
fn loss_is_reported_not_rejected() {
    assert_eq!(compute_profit(1000.0, 0.0, 1200.0), -200.0);
}

#[test]
fn non_finite_inputs_are_coerced_to_zero() {
    assert_eq!(compute_profit(f64::NAN, 100.0, 50.0), -150.0);
    assert_eq!(compute_profit(1000.0, f64::INFINITY, -5.0), 1000.0);
    let items = [LineItem {
        unit_cost: f64::NAN,
        quantity: 3,
    }];
    assert_eq!(compute_vault_allocation(&items), 0.0);
}

#[test]
fn twelve_unit_sale_reconciles_at_a_loss() {
    let calculator = SplitCalculator::default();
    let split = calculator.split(12, &[LineItem::new(400.0, 12)], 10_000.0);

    assert_eq!(split.freight, 6000.0);
    assert_eq!(split.vault_allocation, 4800.0);
    assert_eq!(split.profit, -800.0);
    assert!(calculator.verify_split(split.freight, split.vault_allocation, split.profit, 10_000.0));
    assert!(split.is_loss());
    assert_eq!(split.reconciliation, Reconciliation::Balanced);
    insta::assert_snapshot!(split.reconciliation.to_string(), @"✓ Correcto");
}

#[test]
fn freight_rate_comes_from_configuration() {
    let calculator = SplitCalculator::new(SplitConfig::default().with_freight_rate(350.0));
    assert_eq!(calculator.compute_freight(10), 3500.0);
}

#[test]
fn split_sale_prefers_line_item_units() {
    let calculator = SplitCalculator::default();
    let sale = Sale {
        id: "V-1".to_string(),
        client: "C-1".to_string(),
        quantity: 5,
        line_items: vec![LineItem::new(100.0, 2), LineItem::new(150.0, 4)],
        sale_price: 5000.0,
        status: SaleStatus::Paid,
        ..Sale::default()
    };
    let split = calculator.split_sale(&sale);
    assert_eq!(split.freight, 3000.0);
    assert_eq!(split.vault_allocation, 800.0);
    assert_eq!(split.profit, 1200.0);
    assert!((split.margin_percentage() - 24.0).abs() < 1e-9);
}

#[test]
fn split_sale_falls_back_to_declared_quantity() {
    let calculator = SplitCalculator::default();
    let sale = Sale {
        quantity: 3,
        sale_price: 2000.0,
        ..Sale::default()
    };
    assert_eq!(calculator.split_sale(&sale).freight, 1500.0);
}

#[test]
fn stored_split_discrepancy_is_flagged() {
    let calculator = SplitCalculator::default();
    let sale = Sale {
        sale_price: 10_000.0,
        freight: 6000.0,
        vault_allocation: 4800.0,
        profit: 0.0,
        ..Sale::default()
    };
    let reconciliation = calculator.reconcile_stored(&sale);
    assert_eq!(reconciliation, Reconciliation::Discrepancy { delta: 800.0 });
    insta::assert_snapshot!(reconciliation.label(), @"⚠ Discrepancia");
}

#[test]
fn tolerance_is_strict() {
    assert!(verify_split(1.0, 1.0, 1.0, 3.009, 0.01));
    assert!(!verify_split(1.0, 1.0, 1.0, 3.02, 0.01));
}

#[test]
fn zero_price_has_zero_margin() {
    let split = SplitCalculator::default().split(0, &[], 0.0);
    assert_eq!(split.margin_percentage(), 0.0);
    assert!(!split.is_loss());
}

fn arb_line_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(
        (0.0f64..20_000.0, 0u32..500).prop_map(|(cost, qty)| LineItem::new(cost, qty)),
        0..8,
    )
}

proptest! {
    #[test]
    fn split_always_reconciles(
        units in 0i64..5_000,
        items in arb_line_items(),
        price in 0.0f64..10_000_000.0,
    ) {
        let calculator = SplitCalculator::default();
        let split = calculator.split(units, &items, price);
        prop_assert!(verify_split(
            split.freight,
            split.vault_allocation,
            split.profit,
            price,
            0.01
        ));
        prop_assert!(split.reconciliation.is_balanced());
    }

    #[test]
    fn freight_is_linear_in_units(units in 0i64..100_000, rate in 0.0f64..2_000.0) {
        let freight = compute_freight(units, rate);
        prop_assert!(freight >= 0.0);
        prop_assert!((freight - units as f64 * rate).abs() < 1e-6);
    }

    #[test]
    fn vault_allocation_is_order_independent(items in arb_line_items()) {
        let mut reversed = items.clone();
        reversed.reverse();
        let forward = compute_vault_allocation(&items);
        let backward = compute_vault_allocation(&reversed);
        prop_assert!((forward - backward).abs() < 1e-3);
    }
}

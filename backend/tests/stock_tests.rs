//! Weighted-average cost reconciliation

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use tireshop_backend::services::stock::{apply_purchase, apply_sale};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn restock_moves_cost_toward_incoming_price() {
    // 10 at 20.00 plus 5 at 26.00 -> 15 at 22.00
    let (on_hand, cost) = apply_purchase(10, dec("20.00"), 5, dec("26.00"));
    assert_eq!(on_hand, 15);
    assert_eq!(cost, dec("22.00"));
}

#[test]
fn first_purchase_sets_cost_to_price() {
    let (on_hand, cost) = apply_purchase(0, Decimal::ZERO, 3, dec("15.00"));
    assert_eq!(on_hand, 3);
    assert_eq!(cost, dec("15.00"));
}

#[test]
fn zero_denominator_falls_back_to_price() {
    let (on_hand, cost) = apply_purchase(-2, dec("30.00"), 2, dec("40.00"));
    assert_eq!(on_hand, 0);
    assert_eq!(cost, dec("40.00"));
}

#[test]
fn sale_decrements_and_snapshots_pre_sale_cost() {
    // 4 on hand at 58.50, sell 2
    let sale = apply_sale(4, dec("58.50"), 2).unwrap();
    assert_eq!(sale.new_on_hand, 2);
    assert_eq!(sale.movement_quantity, -2);
    assert_eq!(sale.cost_snapshot, dec("58.50"));
}

#[test]
fn sale_rejects_overdraw_and_non_positive_quantities() {
    assert!(apply_sale(4, dec("58.50"), 5).is_err());
    assert!(apply_sale(4, dec("58.50"), 0).is_err());
    assert!(apply_sale(4, dec("58.50"), -1).is_err());
}

#[test]
fn snapshot_is_unaffected_by_later_purchases() {
    // Sell at the current average, then restock at a higher price: the
    // earlier snapshot keeps the pre-sale cost
    let (on_hand, cost) = apply_purchase(0, Decimal::ZERO, 4, dec("58.50"));
    let sale = apply_sale(on_hand, cost, 2).unwrap();
    let (_, new_cost) = apply_purchase(sale.new_on_hand, cost, 4, dec("70.00"));

    assert_eq!(sale.cost_snapshot, dec("58.50"));
    assert!(new_cost > sale.cost_snapshot);
}

#[test]
fn sequential_purchases_accumulate() {
    let (q1, c1) = apply_purchase(0, Decimal::ZERO, 10, dec("20.00"));
    let (q2, c2) = apply_purchase(q1, c1, 5, dec("26.00"));
    let (q3, c3) = apply_purchase(q2, c2, 15, dec("22.00"));
    assert_eq!(q3, 30);
    assert_eq!(c3, dec("22.00"));
}

fn cents(c: i64) -> Decimal {
    Decimal::new(c, 2)
}

proptest! {
    /// The updated cost always lies between the prior cost and the incoming
    /// price when prior stock is non-negative.
    #[test]
    fn cost_stays_between_prior_and_incoming(
        on_hand in 0..10_000i32,
        prior_cents in 0..1_000_00i64,
        quantity in 1..10_000i32,
        price_cents in 0..1_000_00i64,
    ) {
        let prior = cents(prior_cents);
        let price = cents(price_cents);
        let (new_on_hand, new_cost) = apply_purchase(on_hand, prior, quantity, price);

        prop_assert_eq!(new_on_hand, on_hand + quantity);
        let lo = prior.min(price);
        let hi = prior.max(price);
        if on_hand == 0 {
            prop_assert_eq!(new_cost, price);
        } else {
            prop_assert!(new_cost >= lo && new_cost <= hi);
        }
    }

    /// Total inventory value is conserved: old value plus the purchase
    /// amount equals the new value.
    #[test]
    fn inventory_value_is_conserved(
        on_hand in 0..10_000i32,
        prior_cents in 0..1_000_00i64,
        quantity in 1..10_000i32,
        price_cents in 0..1_000_00i64,
    ) {
        let prior = cents(prior_cents);
        let price = cents(price_cents);
        let (new_on_hand, new_cost) = apply_purchase(on_hand, prior, quantity, price);

        let before = Decimal::from(on_hand) * prior + Decimal::from(quantity) * price;
        let after = Decimal::from(new_on_hand) * new_cost;
        // Division then multiplication can lose a sub-cent remainder
        let drift = (before - after).abs();
        prop_assert!(drift < Decimal::new(1, 2), "drift {} too large", drift);
    }
}

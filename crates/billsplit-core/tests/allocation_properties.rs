//! Property tests for the allocation engine.
//!
//! Random tables of up to 6 items and 6 people, with sparse consumption,
//! checked against the conservation and reconciliation rules.

use billsplit_core::engine::aggregate;
use billsplit_core::{
    split, validate_snapshot, BillConfig, BillSnapshot, Category, Item, Person,
};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Builds a snapshot from a price vector (food first) and a consumption matrix.
fn build(
    num_food: usize,
    prices: Vec<f64>,
    matrix: Vec<Vec<f64>>,
    config: BillConfig,
) -> BillSnapshot {
    let items: Vec<Item> = prices
        .iter()
        .enumerate()
        .map(|(idx, &price)| {
            if idx < num_food {
                Item::new(format!("food_{}", idx + 1), Category::Food, price)
            } else {
                Item::new(
                    format!("alcohol_{}", idx - num_food + 1),
                    Category::Alcohol,
                    price,
                )
            }
        })
        .collect();

    let people = matrix
        .into_iter()
        .enumerate()
        .map(|(p, row)| {
            row.into_iter()
                .zip(&items)
                .fold(Person::new(format!("Person {}", p + 1)), |person, (qty, item)| {
                    person.consumed(item.id.clone(), qty)
                })
        })
        .collect();

    BillSnapshot::new(items, people, config)
}

/// Drops taxes and discounts nobody could carry, so the bill is payable.
fn payable(mut snapshot: BillSnapshot) -> BillSnapshot {
    let aggregation = aggregate(&snapshot);
    let config = &mut snapshot.config;

    if aggregation.food.total_menu_price <= 0.0 {
        config.food_tax_amount = 0.0;
        config.discount_food = 0.0;
    }
    if aggregation.alcohol.total_menu_price <= 0.0 {
        config.alcohol_tax_amount = 0.0;
        config.discount_alcohol = 0.0;
    }
    if aggregation.food.total_menu_price + aggregation.alcohol.total_menu_price <= 0.0 {
        config.discount_total = 0.0;
        config.service_charge_amount = 0.0;
    }
    snapshot
}

fn snapshot_strategy() -> impl Strategy<Value = BillSnapshot> {
    (1usize..4, 0usize..3, 1usize..7)
        .prop_flat_map(|(num_food, num_alcohol, num_people)| {
            let num_items = num_food + num_alcohol;
            let quantity = prop_oneof![Just(0.0), Just(1.0), 0.0f64..3.0];
            (
                Just(num_food),
                prop::collection::vec(0.5f64..200.0, num_items),
                prop::collection::vec(prop::collection::vec(quantity, num_items), num_people),
                (
                    0.0f64..25.0,
                    0.0f64..25.0,
                    0.0f64..15.0,
                    0.0f64..15.0,
                    0.0f64..15.0,
                    0.0f64..30.0,
                ),
            )
        })
        .prop_map(
            |(num_food, prices, matrix, (food_tax, alcohol_tax, sc, extra, d_food, d_alcohol))| {
                let config = BillConfig {
                    // gross of service charge, so the effective discount is >= 0
                    discount_total: sc + extra,
                    discount_food: d_food,
                    discount_alcohol: d_alcohol,
                    food_tax_amount: food_tax,
                    alcohol_tax_amount: alcohol_tax,
                    service_charge_amount: sc,
                };
                payable(build(num_food, prices, matrix, config))
            },
        )
}

proptest! {
    #[test]
    fn menu_value_is_conserved_per_consumed_item(snapshot in snapshot_strategy()) {
        let result = split(&snapshot);

        for item in &snapshot.items {
            let allocated: f64 = result.shares.iter().map(|s| s.item_shares[&item.id]).sum();
            if result.aggregation.consumption_of(&item.id) > 0.0 {
                prop_assert!(close(allocated, item.menu_price), "{} allocated {}", item.id, allocated);
            } else {
                prop_assert_eq!(allocated, 0.0);
            }
        }

        prop_assert!(close(result.totals.food_share, result.aggregation.food.total_menu_price));
        prop_assert!(close(result.totals.alcohol_share, result.aggregation.alcohol.total_menu_price));
    }

    #[test]
    fn person_totals_reconcile_with_bill(snapshot in snapshot_strategy()) {
        prop_assert!(validate_snapshot(&snapshot).is_ok());

        let result = split(&snapshot);
        prop_assert!(result.reconciliation.balanced, "{:?}", result.reconciliation);
        prop_assert!(close(result.totals.total, result.summary.final_after_discount));
    }

    #[test]
    fn shares_are_finite_and_discounts_non_positive(snapshot in snapshot_strategy()) {
        let result = split(&snapshot);

        for share in &result.shares {
            prop_assert!(share.total.is_finite());
            prop_assert!(share.item_shares.values().all(|v| v.is_finite()));
            prop_assert!(share.discount_share <= 0.0, "{} got {}", share.name, share.discount_share);
        }
    }

    #[test]
    fn discount_column_sums_to_entered_discounts(snapshot in snapshot_strategy()) {
        let result = split(&snapshot);
        let config = &snapshot.config;

        let expected = -(config.discount_food
            + config.discount_alcohol
            + config.effective_overall_discount());
        prop_assert!(close(result.totals.discount_share, expected));
    }

    #[test]
    fn split_is_idempotent(snapshot in snapshot_strategy()) {
        prop_assert_eq!(split(&snapshot), split(&snapshot));
    }
}

#[test]
fn unconsumed_item_never_produces_nan() {
    let snapshot = build(
        2,
        vec![12.0, 8.0, 20.0],
        vec![vec![0.0, 1.0, 0.0], vec![0.0, 1.0, 0.0]],
        BillConfig {
            food_tax_amount: 2.0,
            ..Default::default()
        },
    );

    let result = split(&snapshot);
    for share in &result.shares {
        assert_eq!(share.item_shares["food_1"], 0.0);
        assert_eq!(share.item_shares["alcohol_1"], 0.0);
        assert_eq!(share.alcohol_tax_share, 0.0);
        assert!((share.food_share - 4.0).abs() < TOLERANCE);
        assert!((share.food_tax_share - 1.0).abs() < TOLERANCE);
    }
    assert!(result.reconciliation.balanced);
}

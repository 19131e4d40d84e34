//! # Allocation Engine
//!
//! Turns a [`BillSnapshot`] into a [`BillSplit`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         split(snapshot)                                 │
//! │                                                                         │
//! │  1. aggregate()        Σ consumption per item, menu totals per category │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  2. summarize()        pre tax → post tax → + service → − discounts     │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  3. person_share()     item shares → tax shares → discount terms        │
//! │          │             (once per person)                                │
//! │          ▼                                                              │
//! │  4. reconcile          Σ totals vs. final after discount                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Division policy
//! Every ratio goes through [`ratio`]: a zero denominator yields 0. An
//! item nobody ate, a category with no consumed items or an empty
//! post-tax bill never produce NaN or infinity.
//!
//! ## Example
//! ```rust
//! use billsplit_core::engine::split;
//! use billsplit_core::types::{BillConfig, BillSnapshot, Category, Item, Person};
//!
//! let snapshot = BillSnapshot::new(
//!     vec![Item::new("food_1", Category::Food, 100.0)],
//!     vec![
//!         Person::new("Ana").consumed("food_1", 1.0),
//!         Person::new("Ben").consumed("food_1", 1.0),
//!     ],
//!     BillConfig { food_tax_amount: 10.0, ..Default::default() },
//! );
//!
//! let result = split(&snapshot);
//! assert_eq!(result.shares[0].total, 55.0);
//! assert_eq!(result.summary.final_after_discount, 110.0);
//! assert!(result.reconciliation.balanced);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::reconcile::{Reconciliation, DEFAULT_TOLERANCE};
use crate::types::{
    Aggregation, BillConfig, BillSnapshot, BillSummary, Category, CategoryTotals, CostLine,
    DiscountTerms, Person, PersonShare, ShareTotals,
};

// =============================================================================
// Result Type
// =============================================================================

/// Complete output of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillSplit {
    pub aggregation: Aggregation,
    pub summary: BillSummary,
    /// One entry per person, in input order.
    pub shares: Vec<PersonShare>,
    /// Column sums of `shares`.
    pub totals: ShareTotals,
    pub reconciliation: Reconciliation,
}

impl BillSplit {
    /// Fails with `ReconciliationMismatch` if the split does not add up.
    pub fn ensure_reconciled(&self) -> CoreResult<()> {
        self.reconciliation.ensure_balanced()
    }

    /// `(name, total)` pairs for the final summary table.
    pub fn final_totals(&self) -> impl Iterator<Item = (&str, f64)> {
        self.shares
            .iter()
            .map(|share| (share.name.as_str(), share.total))
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Runs the engine with [`DEFAULT_TOLERANCE`].
pub fn split(snapshot: &BillSnapshot) -> BillSplit {
    split_with_tolerance(snapshot, DEFAULT_TOLERANCE)
}

/// Runs the engine, reconciling with the given tolerance.
///
/// The snapshot is assumed valid (see `validation::validate_snapshot`).
pub fn split_with_tolerance(snapshot: &BillSnapshot, tolerance: f64) -> BillSplit {
    let aggregation = aggregate(snapshot);
    let summary = summarize(&aggregation, &snapshot.config);

    let shares: Vec<PersonShare> = snapshot
        .people
        .iter()
        .map(|person| person_share(snapshot, &aggregation, &summary, person))
        .collect();

    let totals = ShareTotals::from_shares(&shares);
    let reconciliation =
        Reconciliation::compare(summary.final_after_discount, totals.total, tolerance);

    debug!(
        items = snapshot.items.len(),
        people = snapshot.people.len(),
        final_after_discount = summary.final_after_discount,
        allocated = totals.total,
        "bill split computed"
    );

    if !reconciliation.balanced {
        warn!(
            expected = reconciliation.expected,
            allocated = reconciliation.allocated,
            difference = reconciliation.difference,
            "per-person totals do not reconcile with the bill"
        );
    }

    BillSplit {
        aggregation,
        summary,
        shares,
        totals,
        reconciliation,
    }
}

// =============================================================================
// Step 1: Aggregation
// =============================================================================

/// Sums consumption per item and menu prices per category.
///
/// `listed_menu_price` counts every item; `total_menu_price` only counts
/// items somebody consumed, so an unordered line never enters the bill.
pub fn aggregate(snapshot: &BillSnapshot) -> Aggregation {
    let mut total_consumption = BTreeMap::new();
    let mut food = CategoryTotals::default();
    let mut alcohol = CategoryTotals::default();

    for item in &snapshot.items {
        let consumed: f64 = snapshot
            .people
            .iter()
            .map(|person| person.quantity(&item.id))
            .sum();
        total_consumption.insert(item.id.clone(), consumed);

        let totals = match item.category {
            Category::Food => &mut food,
            Category::Alcohol => &mut alcohol,
        };
        totals.listed_menu_price += item.menu_price;
        if consumed > 0.0 {
            totals.total_menu_price += item.menu_price;
        }
    }

    Aggregation {
        total_consumption,
        food,
        alcohol,
    }
}

// =============================================================================
// Step 2: Bill Summary
// =============================================================================

/// Computes the bill-level cost block.
///
/// ```text
/// pre tax      = menu totals of consumed items
/// post tax     = pre tax + flat category tax
/// pre discount = post tax total + service charge
/// final        = pre discount − (overall + food + alcohol discounts)
/// ```
pub fn summarize(aggregation: &Aggregation, config: &BillConfig) -> BillSummary {
    let pre_tax = CostLine::new(
        aggregation.food.total_menu_price,
        aggregation.alcohol.total_menu_price,
    );
    let post_tax = CostLine::new(
        pre_tax.food + config.food_tax_amount,
        pre_tax.alcohol + config.alcohol_tax_amount,
    );

    let final_before_discount = post_tax.total + config.service_charge_amount;
    let total_discount = config.total_discount();

    BillSummary {
        pre_tax,
        post_tax,
        final_before_discount,
        final_after_discount: final_before_discount - total_discount,
        total_discount,
        effective_overall_discount: config.effective_overall_discount(),
        unallocated_menu_price: aggregation.food.unallocated_menu_price()
            + aggregation.alcohol.unallocated_menu_price(),
    }
}

// =============================================================================
// Step 3: Per-Person Shares
// =============================================================================

/// `numerator / denominator`, or 0 when the denominator is not positive.
#[inline]
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// A person's menu value in one category and what follows from it.
struct CategoryShare {
    menu: f64,
    tax: f64,
    discount: f64,
}

/// Computes one row of the breakdown table.
///
/// ## Columns
/// - **Food / Alcohol**: for each item, the person's fraction of the units
///   consumed times the item's menu price.
/// - **Taxes**: the person's fraction of the category menu total times the
///   flat tax amount.
/// - **Discount**: three terms, negated:
///   1. food discount × food fraction
///   2. alcohol discount × alcohol fraction
///   3. effective overall discount × fraction of the post-tax bill
pub fn person_share(
    snapshot: &BillSnapshot,
    aggregation: &Aggregation,
    summary: &BillSummary,
    person: &Person,
) -> PersonShare {
    let config = &snapshot.config;
    let mut item_shares = BTreeMap::new();

    let [food, alcohol] = Category::ALL.map(|category| {
        let menu: f64 = snapshot
            .items_in(category)
            .map(|item| {
                let share = ratio(
                    person.quantity(&item.id),
                    aggregation.consumption_of(&item.id),
                ) * item.menu_price;
                item_shares.insert(item.id.clone(), share);
                share
            })
            .sum();

        let fraction = ratio(menu, aggregation.category(category).total_menu_price);
        CategoryShare {
            menu,
            tax: fraction * config.tax_amount(category),
            discount: fraction * config.category_discount(category),
        }
    });

    let mut share = PersonShare {
        name: person.name.clone(),
        item_shares,
        food_share: food.menu,
        alcohol_share: alcohol.menu,
        food_tax_share: food.tax,
        alcohol_tax_share: alcohol.tax,
        ..PersonShare::default()
    };

    let post_tax_share = share.post_tax_share();
    share.discount_terms = DiscountTerms {
        food: food.discount,
        alcohol: alcohol.discount,
        overall: ratio(post_tax_share, summary.post_tax.total)
            * summary.effective_overall_discount,
    };
    // 0.0 - x keeps an empty discount at +0.0 rather than -0.0
    share.discount_share = 0.0 - share.discount_terms.sum();
    share.total = post_tax_share + share.discount_share;
    share
}

// =============================================================================
// Unit Tests
// =============================================================================

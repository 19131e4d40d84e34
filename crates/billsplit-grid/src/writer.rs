//! Renders templates and results into the sheet.
//!
//! Two writes, matching the two moments of the workflow:
//!
//! ```text
//! write_template()  counts + amounts ──► blank matrix, zero prices
//!        │
//!        ▼   (people fill in consumption and menu prices)
//! write_result()    snapshot + split ──► matrix, totals, cost block,
//!                                        breakdown, final summary
//! ```
//!
//! Results are written as plain values, not formulas; every run re-renders
//! the whole output region from scratch. The region reaches down to the
//! last used cell of the store, so rows left by a larger table are cleared.

use billsplit_core::{BillSnapshot, BillSplit};
use tracing::debug;

use crate::address::{CellRange, CellRef};
use crate::layout::{
    SheetLayout, ALCOHOL_TAX_CELL, BREAKDOWN_HEADERS, DISCOUNT_ALCOHOL_CELL,
    DISCOUNT_FOOD_CELL, DISCOUNT_TOTAL_CELL, FOOD_TAX_CELL, INPUT_LABELS, NAME_COL,
    NUM_ALCOHOL_CELL, NUM_FOOD_CELL, NUM_PEOPLE_CELL, SERVICE_CHARGE_CELL,
};
use crate::reader::{default_item_label, default_person_name, SheetInputs};
use crate::error::GridResult;
use crate::store::GridStore;

/// Writes labels and values of the input cells.
pub fn write_inputs<S: GridStore>(store: &mut S, inputs: &SheetInputs) {
    for (cell, label) in INPUT_LABELS {
        store.set_text(cell, label);
    }

    let config = &inputs.config;
    store.set_number(NUM_FOOD_CELL, inputs.num_food as f64);
    store.set_number(NUM_ALCOHOL_CELL, inputs.num_alcohol as f64);
    store.set_number(NUM_PEOPLE_CELL, inputs.num_people as f64);
    store.set_number(DISCOUNT_TOTAL_CELL, config.discount_total);
    store.set_number(DISCOUNT_FOOD_CELL, config.discount_food);
    store.set_number(DISCOUNT_ALCOHOL_CELL, config.discount_alcohol);
    store.set_number(FOOD_TAX_CELL, config.food_tax_amount);
    store.set_number(ALCOHOL_TAX_CELL, config.alcohol_tax_amount);
    store.set_number(SERVICE_CHARGE_CELL, config.service_charge_amount);
}

/// Lays out an empty bill: default names and headers, zero consumption,
/// zero menu prices, zero totals.
///
/// Nothing is written when the counts or amounts are invalid.
pub fn write_template<S: GridStore>(
    store: &mut S,
    inputs: &SheetInputs,
) -> GridResult<SheetLayout> {
    inputs.validate()?;
    let layout = inputs.layout();
    write_inputs(store, inputs);
    clear_output(store, &layout);

    let headers: Vec<String> = (0..layout.num_items())
        .map(|idx| default_item_label(&layout, idx))
        .collect();
    write_matrix_frame(store, &layout, &headers);

    for p in 0..layout.num_people {
        store.set_text(
            CellRef::new(layout.person_row(p), NAME_COL),
            &default_person_name(p),
        );
        for idx in 0..layout.num_items() {
            store.set_number(layout.consumption_cell(p, idx), 0.0);
        }
    }

    for idx in 0..layout.num_items() {
        store.set_number(
            CellRef::new(layout.consumption_total_row(), layout.item_col(idx)),
            0.0,
        );
        store.set_number(layout.price_cell(idx), 0.0);
    }

    debug!(
        food = layout.num_food,
        alcohol = layout.num_alcohol,
        people = layout.num_people,
        "template written"
    );
    Ok(layout)
}

/// Renders a computed split over the output region.
pub fn write_result<S: GridStore>(
    store: &mut S,
    layout: &SheetLayout,
    snapshot: &BillSnapshot,
    split: &BillSplit,
) {
    clear_output(store, layout);

    // (a) consumption matrix + totals row
    let headers: Vec<String> = snapshot.items.iter().map(|item| item.label.clone()).collect();
    write_matrix_frame(store, layout, &headers);

    for (p, person) in snapshot.people.iter().enumerate() {
        store.set_text(CellRef::new(layout.person_row(p), NAME_COL), &person.name);
        for (idx, item) in snapshot.items.iter().enumerate() {
            store.set_number(layout.consumption_cell(p, idx), person.quantity(&item.id));
        }
    }

    // (b) totals row and menu prices
    for (idx, item) in snapshot.items.iter().enumerate() {
        store.set_number(
            CellRef::new(layout.consumption_total_row(), layout.item_col(idx)),
            split.aggregation.consumption_of(&item.id),
        );
        store.set_number(layout.price_cell(idx), item.menu_price);
    }

    // (c) cost summary
    write_cost_block(store, layout, split);

    // (d) per-person breakdown
    write_breakdown(store, layout, split);

    // (e) final summary
    let summary_row = layout.summary_header_row();
    store.set_row(CellRef::new(summary_row, NAME_COL), ["People", "Final Total"]);
    for (p, (name, total)) in split.final_totals().enumerate() {
        let row = layout.summary_row(p);
        store.set_text(CellRef::new(row, NAME_COL), name);
        store.set_number(CellRef::new(row, NAME_COL + 1), total);
    }

    debug!(
        region = %layout.output_region(),
        balanced = split.reconciliation.balanced,
        "result written"
    );
}

/// Clears the layout's output region, extended to the store's last used
/// row and column.
fn clear_output<S: GridStore>(store: &mut S, layout: &SheetLayout) {
    let region = layout.output_region();
    let end = match store.extent() {
        Some((row, col)) => CellRef::new(region.end.row.max(row), region.end.col.max(col)),
        None => region.end,
    };
    store.clear(CellRange::new(region.start, end));
}

/// Header row, "Total" and "Menu price" labels of the consumption matrix.
fn write_matrix_frame<S: GridStore>(store: &mut S, layout: &SheetLayout, headers: &[String]) {
    store.set_text(CellRef::new(layout.header_row(), NAME_COL), "People");
    for (idx, header) in headers.iter().enumerate() {
        store.set_text(CellRef::new(layout.header_row(), layout.item_col(idx)), header);
    }
    store.set_text(
        CellRef::new(layout.consumption_total_row(), NAME_COL),
        "Total",
    );
    store.set_text(CellRef::new(layout.price_row(), NAME_COL), "Menu price");
}

fn write_cost_block<S: GridStore>(store: &mut S, layout: &SheetLayout, split: &BillSplit) {
    let summary = &split.summary;

    store.set_row(
        CellRef::new(layout.cost_header_row(), NAME_COL),
        ["Cost", "Total Food", "Total Alcohol", "Final Total"],
    );

    let pre_tax = CellRef::new(layout.pre_tax_row(), NAME_COL);
    store.set_text(pre_tax, "Pre Tax");
    store.set_row(
        pre_tax.right(1),
        [summary.pre_tax.food, summary.pre_tax.alcohol, summary.pre_tax.total],
    );

    let post_tax = CellRef::new(layout.post_tax_row(), NAME_COL);
    store.set_text(post_tax, "Post Tax");
    store.set_row(
        post_tax.right(1),
        [summary.post_tax.food, summary.post_tax.alcohol, summary.post_tax.total],
    );

    let pre_discount = CellRef::new(layout.pre_discount_row(), NAME_COL);
    store.set_text(pre_discount, "Final Total (pre discount)");
    store.set_number(pre_discount.right(3), summary.final_before_discount);

    let after_discount = CellRef::new(layout.after_discount_row(), NAME_COL);
    store.set_text(after_discount, "Final Total (After Discount)");
    store.set_number(after_discount.right(3), summary.final_after_discount);
}

fn write_breakdown<S: GridStore>(store: &mut S, layout: &SheetLayout, split: &BillSplit) {
    store.set_row(
        CellRef::new(layout.breakdown_header_row(), NAME_COL),
        BREAKDOWN_HEADERS,
    );

    for (p, share) in split.shares.iter().enumerate() {
        let start = CellRef::new(layout.breakdown_row(p), NAME_COL);
        store.set_text(start, &share.name);
        store.set_row(
            start.right(1),
            [
                share.food_share,
                share.alcohol_share,
                share.food_tax_share,
                share.alcohol_tax_share,
                share.discount_share,
                share.total,
            ],
        );
    }

    let totals = &split.totals;
    let start = CellRef::new(layout.breakdown_totals_row(), NAME_COL);
    store.set_text(start, "Total");
    store.set_row(
        start.right(1),
        [
            totals.food_share,
            totals.alcohol_share,
            totals.food_tax_share,
            totals.alcohol_tax_share,
            totals.discount_share,
            totals.total,
        ],
    );
}

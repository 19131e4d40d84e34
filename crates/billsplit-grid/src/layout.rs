//! # Sheet Layout
//!
//! Fixed positions of every input cell and output table.
//!
//! ```text
//!      A                     B          C          D            E
//!   1  Food items            n_food                Food tax     amount
//!   2  Alcohol items         n_alc                 Alcohol tax  amount
//!   3  People                n_people              Service      amount
//!   4  Discount (total)      amount
//!   5  Discount (food)       amount
//!   6  Discount (alcohol)    amount
//!   7
//!   8  People                Food 1 …   Alcohol 1 …        ◄── output starts
//!   9  Person 1              qty        qty
//!   …
//!      Total                 Σ qty      Σ qty
//!
//!      Menu price            price      price
//!
//!      Cost                  Total Food Total Alc. Final Total
//!      Pre Tax / Post Tax / Final Total (pre discount) / (After Discount)
//!
//!      People  Food  Alcohol  Food Tax  Alcohol Tax  Discount  Total
//!      …one row per person…, Total
//!
//!      People  Final Total
//! ```

use crate::address::{CellRange, CellRef};

/// Food item count.
pub const NUM_FOOD_CELL: CellRef = CellRef::new(1, 2);
/// Alcohol item count.
pub const NUM_ALCOHOL_CELL: CellRef = CellRef::new(2, 2);
/// People count.
pub const NUM_PEOPLE_CELL: CellRef = CellRef::new(3, 2);
/// Overall discount (gross of service charge).
pub const DISCOUNT_TOTAL_CELL: CellRef = CellRef::new(4, 2);
pub const DISCOUNT_FOOD_CELL: CellRef = CellRef::new(5, 2);
pub const DISCOUNT_ALCOHOL_CELL: CellRef = CellRef::new(6, 2);
pub const FOOD_TAX_CELL: CellRef = CellRef::new(1, 5);
pub const ALCOHOL_TAX_CELL: CellRef = CellRef::new(2, 5);
pub const SERVICE_CHARGE_CELL: CellRef = CellRef::new(3, 5);

/// Labels written next to the input cells by the template.
pub const INPUT_LABELS: [(CellRef, &str); 9] = [
    (CellRef::new(1, 1), "Food items"),
    (CellRef::new(2, 1), "Alcohol items"),
    (CellRef::new(3, 1), "People"),
    (CellRef::new(4, 1), "Discount (total)"),
    (CellRef::new(5, 1), "Discount (food)"),
    (CellRef::new(6, 1), "Discount (alcohol)"),
    (CellRef::new(1, 4), "Food tax"),
    (CellRef::new(2, 4), "Alcohol tax"),
    (CellRef::new(3, 4), "Service charge"),
];

/// First row of the generated tables.
pub const OUTPUT_START_ROW: u32 = 8;
/// Minimum region cleared before rendering (`A8:Z200`).
const OUTPUT_MIN_END: CellRef = CellRef::new(200, 26);

pub const NAME_COL: u32 = 1;
const FIRST_ITEM_COL: u32 = 2;

/// Breakdown table header, in column order.
pub const BREAKDOWN_HEADERS: [&str; 7] = [
    "People",
    "Food",
    "Alcohol",
    "Food Tax",
    "Alcohol Tax",
    "Discount",
    "Total",
];

/// 0-based table index as a row/column offset.
fn offset(idx: usize) -> u32 {
    u32::try_from(idx).unwrap_or(u32::MAX)
}

/// Row and column positions for a table of a given size.
///
/// Item columns run food first, then alcohol: item `k` (0-based over the
/// combined list) sits in column `B + k`.
///
/// Counts read from a sheet are capped by `validate_count`; positions of
/// larger tables saturate at `u32::MAX` instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub num_food: usize,
    pub num_alcohol: usize,
    pub num_people: usize,
}

impl SheetLayout {
    pub fn new(num_food: usize, num_alcohol: usize, num_people: usize) -> Self {
        SheetLayout {
            num_food,
            num_alcohol,
            num_people,
        }
    }

    pub fn num_items(&self) -> usize {
        self.num_food.saturating_add(self.num_alcohol)
    }

    /// Column of item `idx` (food first, then alcohol).
    pub fn item_col(&self, idx: usize) -> u32 {
        FIRST_ITEM_COL.saturating_add(offset(idx))
    }

    /// First alcohol column.
    pub fn alcohol_start_col(&self) -> u32 {
        self.item_col(self.num_food)
    }

    // -------------------------------------------------------------------------
    // Consumption matrix
    // -------------------------------------------------------------------------

    pub fn header_row(&self) -> u32 {
        OUTPUT_START_ROW
    }

    /// Row of person `idx` (0-based) in the consumption matrix.
    pub fn person_row(&self, idx: usize) -> u32 {
        self.header_row().saturating_add(1).saturating_add(offset(idx))
    }

    pub fn consumption_total_row(&self) -> u32 {
        self.person_row(self.num_people)
    }

    pub fn price_row(&self) -> u32 {
        self.consumption_total_row().saturating_add(2)
    }

    /// Cell holding how much person `person` consumed of item `item`.
    pub fn consumption_cell(&self, person: usize, item: usize) -> CellRef {
        CellRef::new(self.person_row(person), self.item_col(item))
    }

    pub fn price_cell(&self, item: usize) -> CellRef {
        CellRef::new(self.price_row(), self.item_col(item))
    }

    // -------------------------------------------------------------------------
    // Cost summary block
    // -------------------------------------------------------------------------

    pub fn cost_header_row(&self) -> u32 {
        self.price_row().saturating_add(2)
    }

    pub fn pre_tax_row(&self) -> u32 {
        self.cost_header_row().saturating_add(1)
    }

    pub fn post_tax_row(&self) -> u32 {
        self.cost_header_row().saturating_add(2)
    }

    pub fn pre_discount_row(&self) -> u32 {
        self.cost_header_row().saturating_add(3)
    }

    pub fn after_discount_row(&self) -> u32 {
        self.cost_header_row().saturating_add(4)
    }

    // -------------------------------------------------------------------------
    // Breakdown and final summary
    // -------------------------------------------------------------------------

    pub fn breakdown_header_row(&self) -> u32 {
        self.cost_header_row().saturating_add(6)
    }

    pub fn breakdown_row(&self, idx: usize) -> u32 {
        self.breakdown_header_row()
            .saturating_add(1)
            .saturating_add(offset(idx))
    }

    pub fn breakdown_totals_row(&self) -> u32 {
        self.breakdown_row(self.num_people)
    }

    pub fn summary_header_row(&self) -> u32 {
        self.breakdown_totals_row().saturating_add(2)
    }

    pub fn summary_row(&self, idx: usize) -> u32 {
        self.summary_header_row()
            .saturating_add(1)
            .saturating_add(offset(idx))
    }

    /// Last row written by a full render.
    pub fn last_row(&self) -> u32 {
        self.summary_row(self.num_people.saturating_sub(1))
    }

    /// Region cleared before writing: at least `A8:Z200`, grown to fit
    /// wide or long tables.
    pub fn output_region(&self) -> CellRange {
        let last_col = self
            .item_col(self.num_items().saturating_sub(1))
            .max(BREAKDOWN_HEADERS.len() as u32);
        CellRange::new(
            CellRef::new(OUTPUT_START_ROW, NAME_COL),
            CellRef::new(
                self.last_row().max(OUTPUT_MIN_END.row),
                last_col.max(OUTPUT_MIN_END.col),
            ),
        )
    }
}

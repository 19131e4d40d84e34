//! # billsplit-grid: Grid Store Adapter
//!
//! Connects the pure engine in `billsplit-core` to a cell grid laid out the
//! way people fill in a bill by hand.
//!
//! ## Modules
//! - [`address`] - A1 references and column letters
//! - [`store`] - `GridStore` trait and the in-memory grid
//! - [`csv_store`] - load/save a grid as CSV
//! - [`layout`] - where every input and table lives
//! - [`reader`] - cells → `BillSnapshot`
//! - [`writer`] - template and result rendering
//!
//! ## Example
//! ```rust
//! use billsplit_core::BillConfig;
//! use billsplit_grid::{recompute, write_template, GridStore, MemoryGrid, SheetInputs};
//!
//! let mut sheet = MemoryGrid::new();
//! let layout = write_template(&mut sheet, &SheetInputs {
//!     num_food: 1,
//!     num_alcohol: 0,
//!     num_people: 2,
//!     config: BillConfig::default(),
//! })?;
//!
//! // people fill in the sheet
//! sheet.set_number(layout.consumption_cell(0, 0), 1.0);
//! sheet.set_number(layout.consumption_cell(1, 0), 1.0);
//! sheet.set_number(layout.price_cell(0), 80.0);
//!
//! let split = recompute(&mut sheet, billsplit_core::DEFAULT_TOLERANCE)?;
//! assert_eq!(split.shares[1].total, 40.0);
//! # Ok::<(), billsplit_grid::GridError>(())
//! ```

pub mod address;
pub mod csv_store;
pub mod error;
pub mod layout;
pub mod reader;
pub mod store;
pub mod writer;

pub use address::{column_to_letters, letters_to_column, CellRange, CellRef};
pub use error::{GridError, GridResult};
pub use layout::SheetLayout;
pub use reader::{read_inputs, read_snapshot, SheetInputs};
pub use store::{CellValue, GridStore, MemoryGrid};
pub use writer::{write_inputs, write_result, write_template};

use billsplit_core::{split_with_tolerance, BillSplit};
use tracing::info;

/// Reads the sheet, runs the engine and renders the result back.
///
/// An unreconciled split is still written; the caller decides what to do
/// with `split.reconciliation`.
pub fn recompute<S: GridStore>(store: &mut S, tolerance: f64) -> GridResult<BillSplit> {
    let (layout, snapshot) = read_snapshot(store)?;
    let split = split_with_tolerance(&snapshot, tolerance);
    write_result(store, &layout, &snapshot, &split);

    info!(
        people = snapshot.people.len(),
        final_total = split.summary.final_after_discount,
        balanced = split.reconciliation.balanced,
        "sheet recomputed"
    );
    Ok(split)
}

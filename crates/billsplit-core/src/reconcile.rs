//! # Reconciliation
//!
//! Checks that the per-person totals add back up to the bill.
//!
//! ```text
//!   Σ PersonShare.total  ==  BillSummary.final_after_discount   (± tolerance)
//! ```
//!
//! The formulas make this hold algebraically whenever every category that
//! carries a tax or a discount also has consumed items. A mismatch is
//! recorded, never corrected: it means the inputs describe a bill nobody
//! can be charged for as entered.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Default absolute tolerance for comparing sums of `f64` amounts.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Outcome of comparing allocated totals with the bill total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// `final_after_discount` from the bill summary.
    pub expected: f64,
    /// Sum of every person's total.
    pub allocated: f64,
    /// `allocated - expected`.
    pub difference: f64,
    pub tolerance: f64,
    /// `|difference| <= tolerance` (scaled, see [`Reconciliation::compare`]).
    pub balanced: bool,
}

impl Reconciliation {
    /// Compares two totals.
    ///
    /// The tolerance is absolute for small bills and relative to the bill
    /// magnitude above 1.0, so a 1e-9 tolerance still holds for a bill of
    /// several thousand after a few dozen floating-point additions.
    pub fn compare(expected: f64, allocated: f64, tolerance: f64) -> Self {
        let difference = allocated - expected;
        let scale = expected.abs().max(allocated.abs()).max(1.0);
        Reconciliation {
            expected,
            allocated,
            difference,
            tolerance,
            balanced: difference.abs() <= tolerance * scale,
        }
    }

    /// Turns an unbalanced result into `CoreError::ReconciliationMismatch`.
    pub fn ensure_balanced(&self) -> CoreResult<()> {
        if self.balanced {
            return Ok(());
        }

        Err(CoreError::ReconciliationMismatch {
            expected: self.expected,
            allocated: self.allocated,
            difference: self.difference,
        })
    }
}

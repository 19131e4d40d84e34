//! # billsplit-core: Pure Allocation Engine
//!
//! Splits a shared restaurant bill across the people at the table, in
//! proportion to what each of them consumed. Zero I/O: a snapshot goes in,
//! a fully reconciled breakdown comes out.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        billsplit Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    billsplit-cli                                │   │
//! │  │    template ──► (user fills sheet) ──► compute / split          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 billsplit-grid (grid store adapter)             │   │
//! │  │    A1 cells ──► BillSnapshot          BillSplit ──► A1 cells    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ billsplit-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  engine   │  │ reconcile │  │ validation│  │   │
//! │  │   │  Snapshot │  │ aggregate │  │  Σ check  │  │  boundary │  │   │
//! │  │   │  Shares   │  │  shares   │  │           │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CELL ADDRESSING • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Snapshot inputs and derived outputs
//! - [`engine`] - Aggregation, bill summary, per-person shares
//! - [`reconcile`] - Σ person totals vs. bill total
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary checks on snapshots
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same snapshot in = same split out, every time
//! 2. **No I/O**: reading and rendering cells belongs to the adapter
//! 3. **Total**: zero denominators evaluate to 0, the engine never fails
//! 4. **Explicit Errors**: invalid input is rejected before the engine runs
//!
//! ## Example Usage
//!
//! ```rust
//! use billsplit_core::{split, validate_snapshot, BillConfig, BillSnapshot, Category, Item, Person};
//!
//! let snapshot = BillSnapshot::new(
//!     vec![
//!         Item::new("food_1", Category::Food, 100.0),
//!         Item::new("alcohol_1", Category::Alcohol, 30.0),
//!     ],
//!     vec![
//!         Person::new("Ana").consumed("food_1", 1.0).consumed("alcohol_1", 1.0),
//!         Person::new("Ben").consumed("food_1", 1.0),
//!     ],
//!     BillConfig { discount_food: 20.0, ..Default::default() },
//! );
//! validate_snapshot(&snapshot)?;
//!
//! let result = split(&snapshot);
//! assert_eq!(result.shares[0].total, 70.0); // 50 food + 30 wine - 10 discount
//! assert_eq!(result.shares[1].total, 40.0);
//! result.ensure_reconciled()?;
//! # Ok::<(), billsplit_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod reconcile;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use engine::{split, split_with_tolerance, BillSplit};
pub use error::{CoreError, CoreResult, ValidationError};
pub use reconcile::{Reconciliation, DEFAULT_TOLERANCE};
pub use types::*;
pub use validation::{validate_snapshot, MAX_COUNT};

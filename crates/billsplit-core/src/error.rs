//! # Error Types
//!
//! Domain-specific error types for billsplit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billsplit-core errors (this file)                                     │
//! │  ├── CoreError        - Domain errors                                  │
//! │  └── ValidationError  - Input rejected at the boundary                 │
//! │                                                                         │
//! │  billsplit-grid errors (separate crate)                                │
//! │  └── GridError        - Cell addressing, parsing, CSV I/O              │
//! │                                                                         │
//! │  Flow: ValidationError → GridError → CLI (anyhow)                      │
//! │        CoreError (reconciliation) ──────► CLI (anyhow)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! A ratio with a zero denominator (nobody ate the dish, no food on the
//! bill, empty post-tax total) evaluates to 0. The engine always produces
//! a result; it never fails on arithmetic.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The per-person totals do not add up to the bill after discount.
    ///
    /// ## When This Occurs
    /// Diagnostic only. The engine records the mismatch on the result and
    /// only callers that ask for it (`BillSplit::ensure_reconciled`) get
    /// this error. Typical cause: a tax or category discount entered for a
    /// category with no consumed items, so nobody can carry it.
    ///
    /// ```text
    /// Food tax 10.00, but no food consumed
    ///      │
    ///      ▼
    /// Σ person totals = 40.00, bill after discount = 50.00
    ///      │
    ///      ▼
    /// ReconciliationMismatch { expected: 50.0, allocated: 40.0, .. }
    /// ```
    #[error(
        "Allocated total {allocated} does not match bill total {expected} (difference {difference})"
    )]
    ReconciliationMismatch {
        expected: f64,
        allocated: f64,
        difference: f64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The engine assumes non-negative, finite inputs. These errors are raised
/// by `validation` before a snapshot reaches it.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value above the allowed maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: usize },

    /// Value must be zero or greater.
    #[error("{field} must not be negative (got {value})")]
    Negative { field: String, value: f64 },

    /// NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Consumption references an item that does not exist.
    #[error("{person} consumed unknown item '{item}'")]
    UnknownItem { person: String, item: String },

    /// Duplicate value (e.g., two items sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ReconciliationMismatch {
            expected: 50.0,
            allocated: 40.0,
            difference: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "Allocated total 40 does not match bill total 50 (difference 10)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Negative {
            field: "menu price of Food 1".to_string(),
            value: -2.5,
        };
        assert_eq!(err.to_string(), "menu price of Food 1 must not be negative (got -2.5)");

        let err = ValidationError::UnknownItem {
            person: "Person 1".to_string(),
            item: "food_9".to_string(),
        };
        assert_eq!(err.to_string(), "Person 1 consumed unknown item 'food_9'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "people".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

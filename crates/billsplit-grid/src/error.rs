//! Grid adapter error types

use billsplit_core::ValidationError;
use thiserror::Error;

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised while addressing, reading or rendering the sheet.
#[derive(Debug, Error)]
pub enum GridError {
    /// A1 reference could not be parsed
    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    /// An input cell holds text where a number is expected
    #[error("Cell {cell} must be a number, found '{value}'")]
    NotANumber { cell: String, value: String },

    /// Input rejected before reaching the engine
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The counts in `B1:B3` no longer describe the table below them
    #[error(
        "Table does not match the counts in B1:B3 (expected its Total row at row {row}); write a new template"
    )]
    StaleLayout { row: u32 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

//! # Grid Store
//!
//! The cell storage the adapter reads inputs from and renders results into.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  trait GridStore                                                 │
//! │    get / set / clear         ◄── implemented per backend         │
//! │    read_number / read_text   ◄── provided, shared by all         │
//! │                                                                  │
//! │  MemoryGrid   sparse BTreeMap<CellRef, CellValue>                │
//! │  (csv module) load/save a MemoryGrid as a plain CSV file         │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::address::{CellRange, CellRef};
use crate::error::{GridError, GridResult};

// =============================================================================
// Cell Value
// =============================================================================

/// Contents of one cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Text cell helper.
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Parses a raw field: blank is `Empty`, numeric is `Number`.
    pub fn detect(raw: &str) -> Self {
        let raw = raw.trim();

        if raw.is_empty() {
            return CellValue::Empty;
        }

        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

// =============================================================================
// Store Trait
// =============================================================================

/// Cell-addressed storage.
pub trait GridStore {
    /// Value at `cell` (`Empty` when unset).
    fn get(&self, cell: CellRef) -> CellValue;

    /// Overwrites `cell`. Setting `Empty` removes it.
    fn set(&mut self, cell: CellRef, value: CellValue);

    /// Empties every cell inside `range`.
    fn clear(&mut self, range: CellRange);

    /// Last used row and column, `None` when nothing is set.
    fn extent(&self) -> Option<(u32, u32)>;

    /// Reads a numeric input. Blank cells read as 0, like an empty
    /// spreadsheet cell in arithmetic.
    fn read_number(&self, cell: CellRef) -> GridResult<f64> {
        match self.get(cell) {
            CellValue::Empty => Ok(0.0),
            CellValue::Number(n) => Ok(n),
            CellValue::Text(s) => s.trim().parse::<f64>().map_err(|_| GridError::NotANumber {
                cell: cell.to_string(),
                value: s,
            }),
        }
    }

    /// Reads a label, `None` when blank.
    fn read_text(&self, cell: CellRef) -> Option<String> {
        match self.get(cell) {
            CellValue::Empty => None,
            value => {
                let text = value.to_string();
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }

    fn set_number(&mut self, cell: CellRef, value: f64) {
        self.set(cell, CellValue::Number(value));
    }

    fn set_text(&mut self, cell: CellRef, value: &str) {
        self.set(cell, CellValue::text(value));
    }

    /// Writes `values` left to right starting at `start`.
    fn set_row<I, V>(&mut self, start: CellRef, values: I)
    where
        Self: Sized,
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for (offset, value) in values.into_iter().enumerate() {
            self.set(start.right(offset as u32), value.into());
        }
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Sparse in-memory grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryGrid {
    cells: BTreeMap<CellRef, CellValue>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        MemoryGrid::default()
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl GridStore for MemoryGrid {
    fn get(&self, cell: CellRef) -> CellValue {
        self.cells.get(&cell).cloned().unwrap_or_default()
    }

    fn set(&mut self, cell: CellRef, value: CellValue) {
        if value.is_empty() {
            self.cells.remove(&cell);
        } else {
            self.cells.insert(cell, value);
        }
    }

    fn clear(&mut self, range: CellRange) {
        self.cells.retain(|cell, _| !range.contains(*cell));
    }

    fn extent(&self) -> Option<(u32, u32)> {
        let max_row = self.cells.keys().map(|c| c.row).max()?;
        let max_col = self.cells.keys().map(|c| c.col).max()?;
        Some((max_row, max_col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(CellValue::detect(""), CellValue::Empty);
        assert_eq!(CellValue::detect("  "), CellValue::Empty);
        assert_eq!(CellValue::detect("12.5"), CellValue::Number(12.5));
        assert_eq!(CellValue::detect("Person 1"), CellValue::text("Person 1"));
        assert_eq!(CellValue::detect("NaN"), CellValue::text("NaN"));
    }

    #[test]
    fn test_read_number() {
        let mut grid = MemoryGrid::new();
        grid.set_number(CellRef::new(1, 2), 3.0);
        grid.set_text(CellRef::new(2, 2), " 4.25 ");
        grid.set_text(CellRef::new(3, 2), "three");

        assert_eq!(grid.read_number(CellRef::new(1, 2)).unwrap(), 3.0);
        assert_eq!(grid.read_number(CellRef::new(2, 2)).unwrap(), 4.25);
        assert_eq!(grid.read_number(CellRef::new(9, 9)).unwrap(), 0.0);

        let err = grid.read_number(CellRef::new(3, 2)).unwrap_err();
        assert_eq!(err.to_string(), "Cell B3 must be a number, found 'three'");
    }

    #[test]
    fn test_read_text() {
        let mut grid = MemoryGrid::new();
        grid.set_text(CellRef::new(1, 1), "  Ana ");
        grid.set_number(CellRef::new(2, 1), 42.0);
        grid.set_text(CellRef::new(3, 1), "   ");

        assert_eq!(grid.read_text(CellRef::new(1, 1)).as_deref(), Some("Ana"));
        assert_eq!(grid.read_text(CellRef::new(2, 1)).as_deref(), Some("42"));
        assert_eq!(grid.read_text(CellRef::new(3, 1)), None);
        assert_eq!(grid.read_text(CellRef::new(4, 1)), None);
    }

    #[test]
    fn test_clear_range() {
        let mut grid = MemoryGrid::new();
        grid.set_number(CellRef::new(1, 1), 1.0);
        grid.set_row(CellRef::new(8, 1), ["People", "Food 1"]);
        grid.set_number(CellRef::new(200, 26), 5.0);

        grid.clear("A8:Z200".parse().unwrap());

        assert_eq!(grid.len(), 1);
        assert_eq!(grid.extent(), Some((1, 1)));
    }

    #[test]
    fn test_setting_empty_removes() {
        let mut grid = MemoryGrid::new();
        grid.set_number(CellRef::new(2, 2), 1.0);
        grid.set(CellRef::new(2, 2), CellValue::Empty);
        assert!(grid.is_empty());
        assert_eq!(grid.extent(), None);
    }
}

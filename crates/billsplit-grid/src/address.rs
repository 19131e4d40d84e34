//! A1 cell addressing.
//!
//! Rows and columns are 1-based here, the way they read on the sheet:
//! `CellRef::new(1, 2)` is `B1`.

use std::fmt;
use std::str::FromStr;

use crate::error::{GridError, GridResult};

/// Converts a 1-based column index to letters (1 = A, 26 = Z, 27 = AA).
pub fn column_to_letters(col: u32) -> String {
    let mut letters = String::new();
    let mut n = col;

    while n > 0 {
        let rem = (n - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        n = (n - rem - 1) / 26;
    }

    letters
}

/// Converts column letters to a 1-based index (A = 1, AA = 27).
pub fn letters_to_column(letters: &str) -> GridResult<u32> {
    if letters.is_empty() {
        return Err(GridError::InvalidCellRef("empty column letters".into()));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(GridError::InvalidCellRef(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        col = col
            .checked_mul(26)
            .and_then(|v| v.checked_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1))
            .ok_or_else(|| GridError::InvalidCellRef(format!("column '{}' too large", letters)))?;
    }

    Ok(col)
}

/// A single cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    /// Creates a reference from 1-based row and column.
    pub const fn new(row: u32, col: u32) -> Self {
        CellRef { row, col }
    }

    /// Parses `B4`, `$E$1` or `aa10`. `$` markers are accepted and ignored.
    pub fn parse(s: &str) -> GridResult<Self> {
        let cleaned: String = s.trim().chars().filter(|c| *c != '$').collect();
        let split = cleaned
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| GridError::InvalidCellRef(format!("no row number in '{}'", s)))?;

        let (letters, digits) = cleaned.split_at(split);
        let col = letters_to_column(letters)?;
        let row: u32 = digits
            .parse()
            .map_err(|_| GridError::InvalidCellRef(format!("invalid row number in '{}'", s)))?;

        if row == 0 {
            return Err(GridError::InvalidCellRef(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(CellRef { row, col })
    }

    /// The cell `n` columns to the right.
    pub const fn right(self, n: u32) -> Self {
        CellRef::new(self.row, self.col + n)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_to_letters(self.col), self.row)
    }
}

impl FromStr for CellRef {
    type Err = GridError;

    fn from_str(s: &str) -> GridResult<Self> {
        CellRef::parse(s)
    }
}

/// Inclusive rectangle of cells, e.g. `A8:Z200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    /// Creates a range, normalising the corners.
    pub fn new(a: CellRef, b: CellRef) -> Self {
        CellRange {
            start: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.col..=self.end.col).contains(&cell.col)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for CellRange {
    type Err = GridError;

    fn from_str(s: &str) -> GridResult<Self> {
        let (a, b) = s
            .split_once(':')
            .ok_or_else(|| GridError::InvalidCellRef(format!("'{}' is not a range", s)))?;
        Ok(CellRange::new(CellRef::parse(a)?, CellRef::parse(b)?))
    }
}

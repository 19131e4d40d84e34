//! CSV-backed grid store.
//!
//! A sheet is saved as a plain rectangular CSV: row N of the file is row N
//! of the sheet, column A is the first field. Blank fields are empty cells.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::address::CellRef;
use crate::error::GridResult;
use crate::store::{CellValue, GridStore, MemoryGrid};

/// Reads a CSV file into a grid.
pub fn load<P: AsRef<Path>>(path: P) -> GridResult<MemoryGrid> {
    let path = path.as_ref();
    let grid = read(File::open(path)?)?;
    debug!(path = %path.display(), cells = grid.len(), "sheet loaded");
    Ok(grid)
}

/// Reads CSV from any reader into a grid.
pub fn read<R: Read>(reader: R) -> GridResult<MemoryGrid> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut grid = MemoryGrid::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result?;

        for (col_idx, field) in record.iter().enumerate() {
            let value = CellValue::detect(field);
            if !value.is_empty() {
                grid.set(CellRef::new(row_idx as u32 + 1, col_idx as u32 + 1), value);
            }
        }
    }

    Ok(grid)
}

/// Writes a grid to a CSV file, replacing it.
pub fn save<P: AsRef<Path>>(grid: &MemoryGrid, path: P) -> GridResult<()> {
    let path = path.as_ref();
    write(grid, File::create(path)?)?;
    debug!(path = %path.display(), cells = grid.len(), "sheet saved");
    Ok(())
}

/// Writes a grid as a rectangle from `A1` to its last used cell.
pub fn write<W: Write>(grid: &MemoryGrid, writer: W) -> GridResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(false)
        .from_writer(writer);

    if let Some((max_row, max_col)) = grid.extent() {
        for row in 1..=max_row {
            let record: Vec<String> = (1..=max_col)
                .map(|col| grid.get(CellRef::new(row, col)).to_string())
                .collect();
            csv_writer.write_record(&record)?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

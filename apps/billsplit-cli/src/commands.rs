//! Command handlers.
//!
//! Each handler does its own file I/O and writes human or JSON output to
//! the writer it is given, so tests can drive them without a terminal.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use billsplit_core::{split_with_tolerance, validate_snapshot, BillSnapshot, BillSplit};
use billsplit_grid::{csv_store, recompute, write_template, MemoryGrid, SheetInputs};
use tracing::info;

use crate::cli::TemplateArgs;
use crate::config::CliConfig;

/// `billsplit template`: writes an empty sheet.
pub fn template(args: &TemplateArgs) -> Result<()> {
    let inputs = SheetInputs {
        num_food: args.food,
        num_alcohol: args.alcohol,
        num_people: args.people,
        config: args.config(),
    };

    let mut grid = MemoryGrid::new();
    let layout = write_template(&mut grid, &inputs)?;
    csv_store::save(&grid, &args.output)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;

    info!(
        path = %args.output.display(),
        items = layout.num_items(),
        people = layout.num_people,
        "template created"
    );
    Ok(())
}

/// `billsplit compute`: recomputes a sheet and prints the final totals.
///
/// In strict mode an unreconciled split fails before anything is written.
pub fn compute<W: Write>(
    input: Option<&Path>,
    output: Option<&Path>,
    config: &CliConfig,
    out: &mut W,
) -> Result<()> {
    let input: PathBuf = match input {
        Some(path) => path.to_path_buf(),
        None => match &config.default_sheet {
            Some(path) => path.clone(),
            None => bail!("No sheet given and BILLSPLIT_SHEET is not set"),
        },
    };

    let mut grid = csv_store::load(&input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    let split = recompute(&mut grid, config.tolerance)
        .with_context(|| format!("Failed to compute '{}'", input.display()))?;
    check_reconciled(&split, config)?;

    let target = output.unwrap_or(&input);
    csv_store::save(&grid, target)
        .with_context(|| format!("Failed to write '{}'", target.display()))?;

    for (name, total) in split.final_totals() {
        writeln!(out, "{name}\t{total:.2}")?;
    }
    writeln!(out, "Total\t{:.2}", split.summary.final_after_discount)?;
    Ok(())
}

/// `billsplit split`: runs the engine on a JSON snapshot.
pub fn split<W: Write>(
    path: &Path,
    pretty: bool,
    config: &CliConfig,
    out: &mut W,
) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let snapshot: BillSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid snapshot '{}'", path.display()))?;
    validate_snapshot(&snapshot)?;

    let result = split_with_tolerance(&snapshot, config.tolerance);
    check_reconciled(&result, config)?;

    if pretty {
        serde_json::to_writer_pretty(&mut *out, &result)?;
    } else {
        serde_json::to_writer(&mut *out, &result)?;
    }
    writeln!(out)?;
    Ok(())
}

fn check_reconciled(split: &BillSplit, config: &CliConfig) -> Result<()> {
    if config.strict {
        split
            .ensure_reconciled()
            .context("Split does not add up to the bill (BILLSPLIT_STRICT is set)")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use billsplit_core::{Category, Item, Person};

    fn write_snapshot(dir: &Path, snapshot: &BillSnapshot) -> PathBuf {
        let path = dir.join("bill.json");
        fs::write(&path, serde_json::to_string(snapshot).unwrap()).unwrap();
        path
    }

    fn two_pizzas() -> BillSnapshot {
        BillSnapshot {
            items: vec![Item::new("pizza", Category::Food, 100.0)],
            people: vec![
                Person::new("Ana").consumed("pizza", 1.0),
                Person::new("Ben").consumed("pizza", 1.0),
            ],
            config: Default::default(),
        }
    }

    #[test]
    fn test_split_prints_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(dir.path(), &two_pizzas());

        let mut out = Vec::new();
        split(&path, false, &CliConfig::default(), &mut out).unwrap();

        let result: BillSplit = serde_json::from_slice(&out).unwrap();
        assert_eq!(result.shares[0].total, 50.0);
        assert!(result.reconciliation.balanced);
    }

    #[test]
    fn test_split_rejects_invalid_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = two_pizzas();
        snapshot.people[0] = Person::new("Ana").consumed("pasta", 1.0);
        let path = write_snapshot(dir.path(), &snapshot);

        let err = split(&path, false, &CliConfig::default(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("pasta"), "{err}");
    }

    #[test]
    fn test_strict_mode_fails_unreconciled_split() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = two_pizzas();
        // no alcohol consumed, so nobody carries the alcohol tax
        snapshot.config.alcohol_tax_amount = 5.0;
        let path = write_snapshot(dir.path(), &snapshot);

        let lenient = CliConfig::default();
        assert!(split(&path, false, &lenient, &mut Vec::new()).is_ok());

        let strict = CliConfig {
            strict: true,
            ..CliConfig::default()
        };
        assert!(split(&path, false, &strict, &mut Vec::new()).is_err());
    }

    #[test]
    fn test_compute_requires_a_sheet() {
        let err = compute(None, None, &CliConfig::default(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("BILLSPLIT_SHEET"));
    }
}

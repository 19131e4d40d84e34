//! Template, fill in, compute: the workflow of one dinner, through files.

use std::path::PathBuf;

use billsplit_cli::cli::TemplateArgs;
use billsplit_cli::commands;
use billsplit_cli::config::CliConfig;
use billsplit_grid::{csv_store, CellRef, GridStore, SheetLayout};

fn template_args(output: PathBuf) -> TemplateArgs {
    TemplateArgs {
        food: 1,
        alcohol: 1,
        people: 2,
        discount_total: 0.0,
        discount_food: 0.0,
        discount_alcohol: 0.0,
        food_tax: 10.0,
        alcohol_tax: 0.0,
        service_charge: 0.0,
        output,
    }
}

#[test]
fn template_then_compute() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = dir.path().join("dinner.csv");

    commands::template(&template_args(sheet.clone())).unwrap();

    // both share the pasta, only Ben drinks
    let layout = SheetLayout::new(1, 1, 2);
    let mut grid = csv_store::load(&sheet).unwrap();
    grid.set_number(layout.consumption_cell(0, 0), 1.0);
    grid.set_number(layout.consumption_cell(1, 0), 1.0);
    grid.set_number(layout.consumption_cell(1, 1), 1.0);
    grid.set_number(layout.price_cell(0), 60.0);
    grid.set_number(layout.price_cell(1), 25.0);
    csv_store::save(&grid, &sheet).unwrap();

    let mut out = Vec::new();
    commands::compute(Some(&sheet), None, &CliConfig::default(), &mut out).unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed, "Person 1\t35.00\nPerson 2\t60.00\nTotal\t95.00\n");

    let rendered = csv_store::load(&sheet).unwrap();
    assert_eq!(
        rendered.read_text(CellRef::new(layout.summary_header_row(), 1)),
        Some("People".to_string())
    );
}

#[test]
fn compute_falls_back_to_configured_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = dir.path().join("dinner.csv");
    let rendered = dir.path().join("dinner-split.csv");
    commands::template(&template_args(sheet.clone())).unwrap();

    let config = CliConfig {
        default_sheet: Some(sheet.clone()),
        ..CliConfig::default()
    };
    let mut out = Vec::new();
    commands::compute(None, Some(&rendered), &config, &mut out).unwrap();

    // nothing consumed yet: everyone owes nothing, taxes have no base
    assert!(String::from_utf8(out).unwrap().starts_with("Person 1\t0.00\n"));
    assert!(rendered.exists());
}

#[test]
fn template_rejects_zero_people() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = template_args(dir.path().join("empty.csv"));
    args.people = 0;

    assert!(commands::template(&args).is_err());
    assert!(!args.output.exists());
}

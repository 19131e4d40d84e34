//! Reads a [`BillSnapshot`] out of the sheet.

use billsplit_core::validation::{validate_config, validate_count, validate_optional_count};
use billsplit_core::{validate_snapshot, BillConfig, BillSnapshot, Category, Item, Person};
use tracing::debug;

use crate::address::CellRef;
use crate::error::{GridError, GridResult};
use crate::layout::{
    SheetLayout, ALCOHOL_TAX_CELL, DISCOUNT_ALCOHOL_CELL, DISCOUNT_FOOD_CELL,
    DISCOUNT_TOTAL_CELL, FOOD_TAX_CELL, NAME_COL, NUM_ALCOHOL_CELL, NUM_FOOD_CELL,
    NUM_PEOPLE_CELL, SERVICE_CHARGE_CELL,
};
use crate::store::GridStore;

/// Contents of the input cells (`B1:B6`, `E1:E3`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetInputs {
    pub num_food: usize,
    pub num_alcohol: usize,
    pub num_people: usize,
    pub config: BillConfig,
}

impl SheetInputs {
    pub fn layout(&self) -> SheetLayout {
        SheetLayout::new(self.num_food, self.num_alcohol, self.num_people)
    }

    /// Checks the counts and amounts before a table is laid out for them.
    pub fn validate(&self) -> GridResult<()> {
        validate_count("food items", self.num_food as f64)?;
        validate_optional_count("alcohol items", self.num_alcohol as f64)?;
        validate_count("people", self.num_people as f64)?;
        validate_config(&self.config)?;
        Ok(())
    }
}

/// Reads and validates the input cells.
///
/// The alcohol count may be 0 (a dry table); food and people must be positive.
pub fn read_inputs<S: GridStore>(store: &S) -> GridResult<SheetInputs> {
    let num_food = validate_count("food items", store.read_number(NUM_FOOD_CELL)?)?;
    let num_alcohol =
        validate_optional_count("alcohol items", store.read_number(NUM_ALCOHOL_CELL)?)?;
    let num_people = validate_count("people", store.read_number(NUM_PEOPLE_CELL)?)?;

    let config = BillConfig {
        discount_total: store.read_number(DISCOUNT_TOTAL_CELL)?,
        discount_food: store.read_number(DISCOUNT_FOOD_CELL)?,
        discount_alcohol: store.read_number(DISCOUNT_ALCOHOL_CELL)?,
        food_tax_amount: store.read_number(FOOD_TAX_CELL)?,
        alcohol_tax_amount: store.read_number(ALCOHOL_TAX_CELL)?,
        service_charge_amount: store.read_number(SERVICE_CHARGE_CELL)?,
    };
    validate_config(&config)?;

    Ok(SheetInputs {
        num_food,
        num_alcohol,
        num_people,
        config,
    })
}

/// Fails when the table below the input cells was laid out for other counts.
///
/// The totals row must sit right after the last person, labelled "Total",
/// and end at the last item column.
fn check_table_matches(store: &impl GridStore, layout: &SheetLayout) -> GridResult<()> {
    let row = layout.consumption_total_row();
    let label = store.read_text(CellRef::new(row, NAME_COL));
    let last_item = store.get(CellRef::new(row, layout.item_col(layout.num_items() - 1)));
    let past_last = store.get(CellRef::new(row, layout.item_col(layout.num_items())));

    if label.as_deref() != Some("Total") || last_item.is_empty() || !past_last.is_empty() {
        return Err(GridError::StaleLayout { row });
    }
    Ok(())
}

/// Category and default label of item `idx` in sheet order.
pub(crate) fn item_identity(layout: &SheetLayout, idx: usize) -> (Category, usize) {
    if idx < layout.num_food {
        (Category::Food, idx + 1)
    } else {
        (Category::Alcohol, idx - layout.num_food + 1)
    }
}

/// Default header for item `idx` ("Food 2", "Alcohol 1").
pub fn default_item_label(layout: &SheetLayout, idx: usize) -> String {
    let (category, n) = item_identity(layout, idx);
    format!("{} {}", category.label(), n)
}

/// Stable id for item `idx` ("food_2", "alcohol_1").
pub fn item_id(layout: &SheetLayout, idx: usize) -> String {
    let (category, n) = item_identity(layout, idx);
    format!("{}_{}", category.id_prefix(), n)
}

/// Default name for person `idx` ("Person 1").
pub fn default_person_name(idx: usize) -> String {
    format!("Person {}", idx + 1)
}

/// Reads the full snapshot: input cells, names, headers, matrix and prices.
///
/// Blank matrix and price cells read as 0. Renamed people and item headers
/// are kept; blank ones fall back to the defaults. Counts edited after the
/// table was written are reported as [`GridError::StaleLayout`].
pub fn read_snapshot<S: GridStore>(store: &S) -> GridResult<(SheetLayout, BillSnapshot)> {
    let inputs = read_inputs(store)?;
    let layout = inputs.layout();
    check_table_matches(store, &layout)?;

    let mut items = Vec::with_capacity(layout.num_items());
    for idx in 0..layout.num_items() {
        let (category, _) = item_identity(&layout, idx);
        let label = store
            .read_text(CellRef::new(layout.header_row(), layout.item_col(idx)))
            .unwrap_or_else(|| default_item_label(&layout, idx));
        let price = store.read_number(layout.price_cell(idx))?;

        items.push(Item::new(item_id(&layout, idx), category, price).with_label(label));
    }

    let mut people = Vec::with_capacity(layout.num_people);
    for p in 0..layout.num_people {
        let name = store
            .read_text(CellRef::new(layout.person_row(p), NAME_COL))
            .unwrap_or_else(|| default_person_name(p));

        let mut person = Person::new(name);
        for (idx, item) in items.iter().enumerate() {
            let quantity = store.read_number(layout.consumption_cell(p, idx))?;
            if quantity != 0.0 {
                person.consumption.insert(item.id.clone(), quantity);
            }
        }
        people.push(person);
    }

    let snapshot = BillSnapshot::new(items, people, inputs.config);
    validate_snapshot(&snapshot)?;

    debug!(
        food = layout.num_food,
        alcohol = layout.num_alcohol,
        people = layout.num_people,
        "snapshot read from sheet"
    );

    Ok((layout, snapshot))
}

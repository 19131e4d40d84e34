//! # Validation Module
//!
//! Boundary checks run before a snapshot reaches the engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Grid adapter / JSON decoding                                 │
//! │  ├── Cells must parse as numbers                                       │
//! │  └── Counts must be positive integers                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Amounts finite and non-negative                                   │
//! │  └── Item ids unique, consumption refers to known items                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine                                                       │
//! │  └── Assumes all of the above; never fails                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billsplit_core::validation::validate_amount;
//!
//! assert!(validate_amount("food tax", 4.5).is_ok());
//! assert!(validate_amount("food tax", -1.0).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{BillConfig, BillSnapshot, Item, Person};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a currency amount or quantity.
///
/// ## Rules
/// - Must be finite (no NaN, no infinity)
/// - Must be >= 0 (zero is allowed: free items, no tax)
pub fn validate_amount(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// Largest item or people count a bill may declare.
///
/// Keeps every table row and column of the sheet well inside `u32`.
pub const MAX_COUNT: usize = 10_000;

/// Validates a count read from the input cells (items or people).
///
/// ## Rules
/// - Must be a whole number
/// - Must be > 0
/// - Must not exceed [`MAX_COUNT`]
///
/// ## Returns
/// The count as `usize`.
pub fn validate_count(field: &str, value: f64) -> ValidationResult<usize> {
    if value < 1.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    validate_optional_count(field, value)
}

/// Like [`validate_count`], but 0 is allowed (a table with no alcohol).
pub fn validate_optional_count(field: &str, value: f64) -> ValidationResult<usize> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }

    if value > MAX_COUNT as f64 {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_COUNT,
        });
    }

    Ok(value as usize)
}

/// Validates the six bill-level amounts.
pub fn validate_config(config: &BillConfig) -> ValidationResult<()> {
    validate_amount("discount total", config.discount_total)?;
    validate_amount("food discount", config.discount_food)?;
    validate_amount("alcohol discount", config.discount_alcohol)?;
    validate_amount("food tax", config.food_tax_amount)?;
    validate_amount("alcohol tax", config.alcohol_tax_amount)?;
    validate_amount("service charge", config.service_charge_amount)?;
    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the menu: unique, non-empty ids and valid prices.
pub fn validate_items(items: &[Item]) -> ValidationResult<()> {
    let mut seen = HashSet::new();

    for item in items {
        if item.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "item id".to_string(),
            });
        }

        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "item id".to_string(),
                value: item.id.clone(),
            });
        }

        validate_amount(&format!("menu price of {}", item.label), item.menu_price)?;
    }

    Ok(())
}

/// Validates one person's consumption against the menu.
fn validate_person(person: &Person, item_ids: &HashSet<&str>) -> ValidationResult<()> {
    for (item_id, quantity) in &person.consumption {
        if !item_ids.contains(item_id.as_str()) {
            return Err(ValidationError::UnknownItem {
                person: person.name.clone(),
                item: item_id.clone(),
            });
        }

        validate_amount(&format!("{} of {}", item_id, person.name), *quantity)?;
    }

    Ok(())
}

/// Validates a complete snapshot.
///
/// ## Example
/// ```rust
/// use billsplit_core::types::{BillConfig, BillSnapshot, Category, Item, Person};
/// use billsplit_core::validation::validate_snapshot;
///
/// let snapshot = BillSnapshot::new(
///     vec![Item::new("food_1", Category::Food, 20.0)],
///     vec![Person::new("Ana").consumed("food_1", 1.0)],
///     BillConfig::default(),
/// );
/// assert!(validate_snapshot(&snapshot).is_ok());
///
/// let nobody = BillSnapshot { people: vec![], ..snapshot };
/// assert!(validate_snapshot(&nobody).is_err());
/// ```
pub fn validate_snapshot(snapshot: &BillSnapshot) -> ValidationResult<()> {
    if snapshot.people.is_empty() {
        return Err(ValidationError::Required {
            field: "people".to_string(),
        });
    }

    validate_items(&snapshot.items)?;
    validate_config(&snapshot.config)?;

    let item_ids: HashSet<&str> = snapshot.items.iter().map(|item| item.id.as_str()).collect();
    for person in &snapshot.people {
        validate_person(person, &item_ids)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn snapshot() -> BillSnapshot {
        BillSnapshot::new(
            vec![
                Item::new("food_1", Category::Food, 30.0),
                Item::new("alcohol_1", Category::Alcohol, 12.0),
            ],
            vec![Person::new("Ana").consumed("food_1", 1.0).consumed("alcohol_1", 0.5)],
            BillConfig::default(),
        )
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("x", 0.0).is_ok());
        assert!(validate_amount("x", 12.75).is_ok());

        assert!(matches!(
            validate_amount("x", -0.01),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            validate_amount("x", f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(validate_amount("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_count() {
        assert_eq!(validate_count("people", 3.0).unwrap(), 3);
        assert!(validate_count("people", 0.0).is_err());
        assert!(validate_count("people", -2.0).is_err());
        assert!(validate_count("people", 2.5).is_err());
        assert_eq!(validate_count("people", MAX_COUNT as f64).unwrap(), MAX_COUNT);
    }

    #[test]
    fn test_validate_count_rejects_oversized() {
        let err = validate_count("people", 1e12).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { max: MAX_COUNT, .. }));
        assert_eq!(err.to_string(), "people must be at most 10000");

        assert!(validate_count("food items", (MAX_COUNT + 1) as f64).is_err());
        assert!(validate_optional_count("alcohol items", 1e12).is_err());
    }

    #[test]
    fn test_validate_optional_count() {
        assert_eq!(validate_optional_count("alcohol items", 0.0).unwrap(), 0);
        assert_eq!(validate_optional_count("alcohol items", 2.0).unwrap(), 2);
        assert!(validate_optional_count("alcohol items", -1.0).is_err());
        assert!(validate_optional_count("alcohol items", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_config() {
        assert!(validate_config(&BillConfig::default()).is_ok());

        let bad = BillConfig {
            service_charge_amount: -5.0,
            ..Default::default()
        };
        let err = validate_config(&bad).unwrap_err();
        assert_eq!(err.to_string(), "service charge must not be negative (got -5)");
    }

    #[test]
    fn test_validate_snapshot_ok() {
        assert!(validate_snapshot(&snapshot()).is_ok());
    }

    #[test]
    fn test_duplicate_item_ids_rejected() {
        let mut snap = snapshot();
        snap.items.push(Item::new("food_1", Category::Food, 5.0));
        assert!(matches!(
            validate_snapshot(&snap),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_unknown_item_rejected() {
        let mut snap = snapshot();
        snap.people.push(Person::new("Ben").consumed("food_7", 1.0));
        assert!(matches!(
            validate_snapshot(&snap),
            Err(ValidationError::UnknownItem { ref person, .. }) if person == "Ben"
        ));
    }

    #[test]
    fn test_negative_consumption_rejected() {
        let mut snap = snapshot();
        snap.people[0].consumption.insert("food_1".to_string(), -1.0);
        assert!(validate_snapshot(&snap).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut snap = snapshot();
        snap.items[1].menu_price = -12.0;
        assert!(validate_snapshot(&snap).is_err());
    }
}

//! # Domain Types
//!
//! Input snapshot and output structures of the allocation engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (BillSnapshot)                                                   │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │      Item       │   │     Person      │   │     BillConfig      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  name           │   │  discount_total     │   │
//! │  │  label          │   │  consumption    │   │  discount_food      │   │
//! │  │  category       │   │  (item → qty)   │   │  discount_alcohol   │   │
//! │  │  menu_price     │   │                 │   │  food/alcohol tax   │   │
//! │  └─────────────────┘   └─────────────────┘   │  service_charge     │   │
//! │                                              └─────────────────────┘   │
//! │  OUTPUT (BillSplit)                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │   Aggregation   │   │   PersonShare   │   │    BillSummary      │   │
//! │  │  per-item qty   │   │  food, alcohol  │   │  pre/post tax       │   │
//! │  │  CategoryTotals │   │  taxes, discount│   │  before/after disc. │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are plain `f64` in the bill currency. Rounding to minor units is
//! the caller's job; the engine compares sums within a tolerance.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Category
// =============================================================================

/// The two cost pools of a bill. Each has its own tax and discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Alcohol,
}

impl Category {
    /// Both categories in sheet order.
    pub const ALL: [Category; 2] = [Category::Food, Category::Alcohol];

    /// Human label used for default item headers ("Food 1", "Alcohol 2").
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Alcohol => "Alcohol",
        }
    }

    /// Lowercase prefix used for generated item ids ("food_1").
    pub const fn id_prefix(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Alcohol => "alcohol",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Item
// =============================================================================

/// One line of the menu.
///
/// `menu_price` is the listed price of the line, independent of how many
/// units were ordered. A dish shared by five people at 40.00 costs 40.00.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable identifier, referenced by `Person::consumption`.
    pub id: String,

    /// Display label ("Food 1", "Margherita").
    pub label: String,

    pub category: Category,

    /// Listed pre-tax price. Non-negative.
    pub menu_price: f64,
}

impl Item {
    /// Creates an item with its label defaulting to the id.
    pub fn new(id: impl Into<String>, category: Category, menu_price: f64) -> Self {
        let id = id.into();
        Item {
            label: id.clone(),
            id,
            category,
            menu_price,
        }
    }

    /// Builder-style label override.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

// =============================================================================
// Person
// =============================================================================

/// Someone at the table and what they consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,

    /// Units consumed per item id. Missing entries count as 0.
    /// Usually 0 or 1, but fractions are allowed ("half a bottle").
    #[serde(default)]
    pub consumption: BTreeMap<String, f64>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Person {
            name: name.into(),
            consumption: BTreeMap::new(),
        }
    }

    /// Builder-style consumption entry. Repeated calls for the same item add up.
    pub fn consumed(mut self, item_id: impl Into<String>, quantity: f64) -> Self {
        *self.consumption.entry(item_id.into()).or_insert(0.0) += quantity;
        self
    }

    /// Quantity of `item_id` consumed by this person (0 when absent).
    #[inline]
    pub fn quantity(&self, item_id: &str) -> f64 {
        self.consumption.get(item_id).copied().unwrap_or(0.0)
    }
}

// =============================================================================
// Bill Config
// =============================================================================

/// Bill-level amounts, all absolute values in the bill currency.
///
/// ## Precondition: `discount_total` is gross of the service charge
/// The service charge is added once to the bill, but it is never spread
/// as its own column. Instead the overall discount pool is reduced by it:
///
/// ```text
/// effective_overall_discount = discount_total - service_charge_amount
/// ```
///
/// A restaurant that adds a 10.00 service charge and then waives 10.00
/// "off the total" therefore leaves everyone paying exactly the menu plus
/// tax. When the service charge exceeds `discount_total` the effective
/// value is negative and works as a proportional surcharge. It is not
/// clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct BillConfig {
    /// Overall discount on the whole bill (gross of service charge).
    pub discount_total: f64,
    /// Discount that applies to food only.
    pub discount_food: f64,
    /// Discount that applies to alcohol only.
    pub discount_alcohol: f64,
    /// Flat food tax amount (not a rate).
    pub food_tax_amount: f64,
    /// Flat alcohol tax amount (not a rate).
    pub alcohol_tax_amount: f64,
    pub service_charge_amount: f64,
}

impl BillConfig {
    /// The overall discount pool after netting out the service charge.
    #[inline]
    pub fn effective_overall_discount(&self) -> f64 {
        self.discount_total - self.service_charge_amount
    }

    /// Sum of the three discount amounts as entered.
    #[inline]
    pub fn total_discount(&self) -> f64 {
        self.discount_total + self.discount_food + self.discount_alcohol
    }

    /// Tax amount for a category.
    #[inline]
    pub fn tax_amount(&self, category: Category) -> f64 {
        match category {
            Category::Food => self.food_tax_amount,
            Category::Alcohol => self.alcohol_tax_amount,
        }
    }

    /// Category-specific discount amount.
    #[inline]
    pub fn category_discount(&self, category: Category) -> f64 {
        match category {
            Category::Food => self.discount_food,
            Category::Alcohol => self.discount_alcohol,
        }
    }
}

// =============================================================================
// Bill Snapshot
// =============================================================================

/// Everything the engine needs for one run. Passed by reference, never
/// mutated; each run recomputes every derived value from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillSnapshot {
    pub items: Vec<Item>,
    pub people: Vec<Person>,
    #[serde(default)]
    pub config: BillConfig,
}

impl BillSnapshot {
    pub fn new(items: Vec<Item>, people: Vec<Person>, config: BillConfig) -> Self {
        BillSnapshot {
            items,
            people,
            config,
        }
    }

    /// Items of one category, in input order.
    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.category == category)
    }
}

// =============================================================================
// Derived: Aggregation
// =============================================================================

/// Menu-price totals for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    /// Sum of every listed item's menu price.
    pub listed_menu_price: f64,

    /// Sum of menu prices of items somebody consumed. This is the base
    /// every share and the summary are computed against.
    pub total_menu_price: f64,
}

impl CategoryTotals {
    /// Menu value of listed items nobody consumed.
    #[inline]
    pub fn unallocated_menu_price(&self) -> f64 {
        self.listed_menu_price - self.total_menu_price
    }
}

/// Result of the aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    /// Units consumed per item id, summed across people.
    pub total_consumption: BTreeMap<String, f64>,
    pub food: CategoryTotals,
    pub alcohol: CategoryTotals,
}

impl Aggregation {
    /// Totals for a category.
    #[inline]
    pub fn category(&self, category: Category) -> &CategoryTotals {
        match category {
            Category::Food => &self.food,
            Category::Alcohol => &self.alcohol,
        }
    }

    /// Total units of `item_id` (0 when nobody consumed it).
    #[inline]
    pub fn consumption_of(&self, item_id: &str) -> f64 {
        self.total_consumption.get(item_id).copied().unwrap_or(0.0)
    }
}

// =============================================================================
// Derived: Bill Summary
// =============================================================================

/// One row of the cost block: food, alcohol and their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    pub food: f64,
    pub alcohol: f64,
    pub total: f64,
}

impl CostLine {
    pub fn new(food: f64, alcohol: f64) -> Self {
        CostLine {
            food,
            alcohol,
            total: food + alcohol,
        }
    }
}

/// Bill-level totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    /// Menu totals of consumed items.
    pub pre_tax: CostLine,

    /// Menu totals plus flat category taxes. `post_tax.total` is the base
    /// the effective overall discount is spread over.
    pub post_tax: CostLine,

    /// `post_tax.total + service_charge_amount`.
    pub final_before_discount: f64,

    /// `final_before_discount - total_discount`.
    pub final_after_discount: f64,

    /// Sum of the three discount amounts.
    pub total_discount: f64,

    /// `discount_total - service_charge_amount`, signed.
    pub effective_overall_discount: f64,

    /// Menu value of listed items nobody consumed (left off the bill).
    pub unallocated_menu_price: f64,
}

// =============================================================================
// Derived: Person Share
// =============================================================================

/// The three discount mechanisms for one person, before negation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTerms {
    /// Share of `discount_food`, by food menu-price fraction.
    pub food: f64,
    /// Share of `discount_alcohol`, by alcohol menu-price fraction.
    pub alcohol: f64,
    /// Share of the effective overall discount, by post-tax fraction.
    pub overall: f64,
}

impl DiscountTerms {
    #[inline]
    pub fn sum(&self) -> f64 {
        self.food + self.alcohol + self.overall
    }
}

/// One row of the per-person breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PersonShare {
    pub name: String,

    /// Menu value attributed to this person, per item id.
    pub item_shares: BTreeMap<String, f64>,

    pub food_share: f64,
    pub alcohol_share: f64,
    pub food_tax_share: f64,
    pub alcohol_tax_share: f64,

    pub discount_terms: DiscountTerms,

    /// `-(discount_terms.sum())`. Non-positive unless the service charge
    /// exceeds the overall discount.
    pub discount_share: f64,

    /// Sum of the five columns above.
    pub total: f64,
}

impl PersonShare {
    /// Food, alcohol and both taxes: the person's post-tax subtotal.
    #[inline]
    pub fn post_tax_share(&self) -> f64 {
        self.food_share + self.alcohol_share + self.food_tax_share + self.alcohol_tax_share
    }
}

/// Column sums of the breakdown table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShareTotals {
    pub food_share: f64,
    pub alcohol_share: f64,
    pub food_tax_share: f64,
    pub alcohol_tax_share: f64,
    pub discount_share: f64,
    pub total: f64,
}

impl ShareTotals {
    /// Sums every column over `shares`.
    pub fn from_shares(shares: &[PersonShare]) -> Self {
        shares.iter().fold(ShareTotals::default(), |acc, share| ShareTotals {
            food_share: acc.food_share + share.food_share,
            alcohol_share: acc.alcohol_share + share.alcohol_share,
            food_tax_share: acc.food_tax_share + share.food_tax_share,
            alcohol_tax_share: acc.alcohol_tax_share + share.alcohol_tax_share,
            discount_share: acc.discount_share + share.discount_share,
            total: acc.total + share.total,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_overall_discount_is_signed() {
        let config = BillConfig {
            discount_total: 5.0,
            service_charge_amount: 12.0,
            ..Default::default()
        };
        assert_eq!(config.effective_overall_discount(), -7.0);
    }

    #[test]
    fn test_person_quantity_defaults_to_zero() {
        let person = Person::new("Ana").consumed("food_1", 1.0).consumed("food_1", 0.5);
        assert_eq!(person.quantity("food_1"), 1.5);
        assert_eq!(person.quantity("alcohol_1"), 0.0);
    }

    #[test]
    fn test_items_in_keeps_order() {
        let snapshot = BillSnapshot::new(
            vec![
                Item::new("food_1", Category::Food, 10.0),
                Item::new("alcohol_1", Category::Alcohol, 8.0),
                Item::new("food_2", Category::Food, 4.0),
            ],
            vec![],
            BillConfig::default(),
        );
        let ids: Vec<_> = snapshot
            .items_in(Category::Food)
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, ["food_1", "food_2"]);
    }

    #[test]
    fn test_config_deserializes_with_missing_fields() {
        let config: BillConfig = serde_json::from_str(r#"{"foodTaxAmount": 3.5}"#).unwrap();
        assert_eq!(config.food_tax_amount, 3.5);
        assert_eq!(config.discount_total, 0.0);
    }

    #[test]
    fn test_category_serde_names() {
        assert_eq!(serde_json::to_string(&Category::Alcohol).unwrap(), "\"alcohol\"");
        assert_eq!(Category::Food.to_string(), "Food");
    }
}

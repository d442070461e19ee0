//! Domain models for the Mealcart pipeline.
//!
//! This module contains the data structures passed between pipeline stages:
//!
//! - [`DishRequest`] - A dish name with a serving count
//! - [`StructuredIngredient`] - A (name, quantity) pair
//! - [`Category`] - Closed set of grocery categories
//! - [`ResolutionResult`] - Outcome of resolving one dish
//! - [`AggregationResult`] - Consolidated grocery list for a set of dishes
//!
//! All of these are request-scoped. Quantities travel as display strings;
//! [`StructuredIngredient::quantity_value`] classifies one into a
//! [`QuantityValue`] when a stage needs to reason about its shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::quantity::{QuantityValue, AS_NEEDED};

// =============================================================================
// Requests
// =============================================================================

/// One requested dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishRequest {
    pub name: String,
    /// Number of servings (the original request layer called this `quantity`).
    #[serde(default = "default_servings", alias = "quantity")]
    pub servings: u32,
}

fn default_servings() -> u32 {
    1
}

impl DishRequest {
    pub fn new(name: impl Into<String>, servings: u32) -> Self {
        Self { name: name.into(), servings }
    }

    /// Parse the CLI shorthand `name[:servings]`.
    ///
    /// A suffix that is not a number is treated as part of the name.
    pub fn from_arg(arg: &str) -> Self {
        if let Some((name, servings)) = arg.rsplit_once(':') {
            if let Ok(n) = servings.trim().parse::<u32>() {
                return Self::new(name.trim(), n.max(1));
            }
        }
        Self::new(arg.trim(), 1)
    }
}

// =============================================================================
// Ingredients
// =============================================================================

/// A parsed ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredIngredient {
    /// Name with its original casing.
    pub name: String,
    /// Quantity as display text (`"300 g"`, `"2 large"`, `"as needed"`...).
    pub quantity: String,
}

impl StructuredIngredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self { name: name.into(), quantity: quantity.into() }
    }

    /// An ingredient with no known amount.
    pub fn as_needed(name: impl Into<String>) -> Self {
        Self::new(name, AS_NEEDED)
    }

    pub fn quantity_value(&self) -> QuantityValue {
        QuantityValue::parse(&self.quantity)
    }
}

// =============================================================================
// Category
// =============================================================================

/// Grocery category. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Meat,
    Fish,
    Produce,
    Dairy,
    Grains,
    Condiments,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Meat,
        Category::Fish,
        Category::Produce,
        Category::Dairy,
        Category::Grains,
        Category::Condiments,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Meat => "Meat",
            Category::Fish => "Fish",
            Category::Produce => "Produce",
            Category::Dairy => "Dairy",
            Category::Grains => "Grains",
            Category::Condiments => "Condiments",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ingredients grouped by category. Empty categories are never present.
pub type CategorizedIngredients = BTreeMap<Category, Vec<StructuredIngredient>>;

// =============================================================================
// Resolution
// =============================================================================

/// Which resolution tier produced a dish's ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Found in the dish cache under the requested name.
    Exact,
    /// Found in the dish cache through an alias.
    Mapped,
    /// Produced by the ingredient suggestion service.
    Generated,
}

/// A successfully resolved dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDish {
    pub dish: String,
    pub ingredients: Vec<StructuredIngredient>,
    pub match_type: MatchType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// No tier could resolve the dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionMiss {
    pub error: String,
    pub suggestions: Vec<String>,
}

/// Outcome of resolving one dish name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResolutionResult {
    Resolved(ResolvedDish),
    Miss(ResolutionMiss),
}

impl ResolutionResult {
    pub fn is_miss(&self) -> bool {
        matches!(self, ResolutionResult::Miss(_))
    }

    pub fn match_type(&self) -> Option<MatchType> {
        match self {
            ResolutionResult::Resolved(d) => Some(d.match_type),
            ResolutionResult::Miss(_) => None,
        }
    }

    pub fn ingredients(&self) -> &[StructuredIngredient] {
        match self {
            ResolutionResult::Resolved(d) => &d.ingredients,
            ResolutionResult::Miss(_) => &[],
        }
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Consolidated grocery list for a set of dish requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// `true` when at least one dish resolved.
    pub success: bool,
    pub dishes: Vec<String>,
    pub missing_dishes: Vec<String>,
    pub items_by_category: CategorizedIngredients,
    pub pantry_items: Vec<StructuredIngredient>,
}

impl AggregationResult {
    /// Total number of grocery lines, pantry included.
    pub fn item_count(&self) -> usize {
        self.items_by_category.values().map(Vec::len).sum::<usize>() + self.pantry_items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dish_request_defaults_to_one_serving() {
        let req: DishRequest = serde_json::from_value(json!({ "name": "Chicken Curry" })).unwrap();
        assert_eq!(req.servings, 1);

        let req: DishRequest =
            serde_json::from_value(json!({ "name": "Chicken Curry", "quantity": 3 })).unwrap();
        assert_eq!(req.servings, 3);
    }

    #[test]
    fn test_dish_request_from_arg() {
        assert_eq!(DishRequest::from_arg("lasagna:4"), DishRequest::new("lasagna", 4));
        assert_eq!(DishRequest::from_arg("lasagna"), DishRequest::new("lasagna", 1));
        assert_eq!(DishRequest::from_arg("soup: later"), DishRequest::new("soup: later", 1));
        assert_eq!(DishRequest::from_arg("stew:0"), DishRequest::new("stew", 1));
    }

    #[test]
    fn test_category_order_and_names() {
        let mut sorted = Category::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Category::ALL.to_vec());
        assert_eq!(Category::Condiments.to_string(), "Condiments");
    }

    #[test]
    fn test_resolution_result_serialization() {
        let resolved = ResolutionResult::Resolved(ResolvedDish {
            dish: "chicken curry".into(),
            ingredients: vec![StructuredIngredient::new("chicken breast", "600 g")],
            match_type: MatchType::Exact,
            note: None,
        });
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["match_type"], "exact");
        assert!(json.get("note").is_none());

        let miss = ResolutionResult::Miss(ResolutionMiss {
            error: "No matching dish found".into(),
            suggestions: vec!["lasagna".into()],
        });
        let json = serde_json::to_value(&miss).unwrap();
        assert_eq!(json["suggestions"][0], "lasagna");
        assert!(json.get("match_type").is_none());
    }

    #[test]
    fn test_items_by_category_serializes_by_name() {
        let mut items = CategorizedIngredients::new();
        items.insert(Category::Fish, vec![StructuredIngredient::new("salmon", "200g")]);
        let result = AggregationResult {
            success: true,
            dishes: vec!["salmon bake".into()],
            missing_dishes: vec![],
            items_by_category: items,
            pantry_items: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["items_by_category"]["Fish"][0]["quantity"], "200g");
        assert_eq!(result.item_count(), 1);
    }
}

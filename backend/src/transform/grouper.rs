//! Group merged ingredients by grocery category.
//!
//! # Architecture
//!
//! ```text
//! Merged ingredients                 →  Categorized + pantry
//! ┌──────────────────────────┐        ┌──────────────────────────┐
//! │ chicken breast   1.5 kg  │        │ Meat:    chicken breast  │
//! │ tomatoes         800 g   │   →    │ Produce: tomatoes        │
//! │ basmati rice     300 g   │        ├──────────────────────────┤
//! └──────────────────────────┘        │ Pantry:  basmati rice    │
//!                                     └──────────────────────────┘
//! ```
//!
//! Categories are tried in declaration order and the first keyword hit wins.
//! Pantry separation runs afterwards with its own lexicon, so an item can be
//! categorized (e.g. rice as Grains) and then pulled into the pantry list.

use crate::lexicon::{contains_any, CATEGORY_KEYWORDS, PANTRY_STAPLES};
use crate::models::{CategorizedIngredients, Category, StructuredIngredient};

/// Category of one ingredient name. `Other` when no keyword matches.
pub fn categorize(name: &str) -> Category {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(name, keywords))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Group ingredients by category, keeping input order inside each group.
pub fn categorize_ingredients(ingredients: Vec<StructuredIngredient>) -> CategorizedIngredients {
    let mut grouped = CategorizedIngredients::new();
    for ingredient in ingredients {
        grouped
            .entry(categorize(&ingredient.name))
            .or_default()
            .push(ingredient);
    }
    grouped
}

/// `true` if `name` is a pantry staple.
pub fn is_pantry_item(name: &str) -> bool {
    contains_any(name, PANTRY_STAPLES)
}

/// Move pantry staples out of every category.
///
/// Pantry items keep category order, then input order. Categories left
/// empty are removed.
pub fn separate_pantry(
    categorized: CategorizedIngredients,
) -> (CategorizedIngredients, Vec<StructuredIngredient>) {
    let mut remaining = CategorizedIngredients::new();
    let mut pantry = Vec::new();

    for (category, items) in categorized {
        let (staples, fresh): (Vec<_>, Vec<_>) =
            items.into_iter().partition(|i| is_pantry_item(&i.name));
        pantry.extend(staples);
        if !fresh.is_empty() {
            remaining.insert(category, fresh);
        }
    }

    (remaining, pantry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize() {
        assert_eq!(categorize("chicken breast"), Category::Meat);
        assert_eq!(categorize("salmon fillet"), Category::Fish);
        assert_eq!(categorize("tomatoes"), Category::Produce);
        assert_eq!(categorize("cheddar cheese"), Category::Dairy);
        assert_eq!(categorize("white rice"), Category::Grains);
        assert_eq!(categorize("olive oil"), Category::Condiments);
        assert_eq!(categorize("something unknown"), Category::Other);
    }

    #[test]
    fn test_categorize_priority() {
        // Meat is tried before Produce.
        assert_eq!(categorize("Chicken and Onion Skewers"), Category::Meat);
        // Produce ("pepper") before Condiments.
        assert_eq!(categorize("Black Pepper"), Category::Produce);
    }

    #[test]
    fn test_categorize_ingredients_drops_nothing() {
        let grouped = categorize_ingredients(vec![
            StructuredIngredient::new("beef mince", "500 g"),
            StructuredIngredient::new("lemon", "1"),
            StructuredIngredient::new("pork belly", "1 kg"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&Category::Meat].len(), 2);
        assert_eq!(grouped[&Category::Meat][1].name, "pork belly");
        assert!(!grouped.contains_key(&Category::Other));
    }

    #[test]
    fn test_pantry_items() {
        for name in ["salt", "pasta", "rice", "canned tomatoes", "chicken stock", "soy sauce"] {
            assert!(is_pantry_item(name), "{} should be a pantry item", name);
        }
        for name in ["chicken", "milk", "eggs", "lettuce", "butter"] {
            assert!(!is_pantry_item(name), "{} should not be a pantry item", name);
        }
    }

    #[test]
    fn test_separate_pantry_drops_emptied_categories() {
        let grouped = categorize_ingredients(vec![
            StructuredIngredient::new("chicken breast", "500g"),
            StructuredIngredient::new("chicken stock", "500ml"),
            StructuredIngredient::new("spaghetti pasta", "400g"),
            StructuredIngredient::new("canned tomatoes", "400g"),
            StructuredIngredient::new("tomatoes", "200g"),
        ]);

        let (remaining, pantry) = separate_pantry(grouped);

        assert_eq!(remaining[&Category::Meat], vec![StructuredIngredient::new("chicken breast", "500g")]);
        assert_eq!(remaining[&Category::Produce], vec![StructuredIngredient::new("tomatoes", "200g")]);
        assert!(!remaining.contains_key(&Category::Grains));

        let pantry_names: Vec<&str> = pantry.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(pantry_names, vec!["chicken stock", "canned tomatoes", "spaghetti pasta"]);
    }
}

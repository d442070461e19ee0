//! Household staple removal for cache-sourced dishes.

use crate::lexicon::{contains_any, HOUSEHOLD_STAPLES};
use crate::models::StructuredIngredient;

/// `true` if `name` looks like something the shopper already has at home.
pub fn is_household_staple(name: &str) -> bool {
    contains_any(name, HOUSEHOLD_STAPLES)
}

/// Drop household staples, keeping the order of the rest.
pub fn filter_fresh(ingredients: Vec<StructuredIngredient>) -> Vec<StructuredIngredient> {
    ingredients
        .into_iter()
        .filter(|i| !is_household_staple(&i.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_fresh_keeps_order() {
        let kept = filter_fresh(vec![
            StructuredIngredient::new("Chicken breast", "500g"),
            StructuredIngredient::new("Salt", "1 tsp"),
            StructuredIngredient::new("Olive oil", "2 tbsp"),
            StructuredIngredient::new("Tomatoes", "3 pieces"),
        ]);

        assert_eq!(
            kept,
            vec![
                StructuredIngredient::new("Chicken breast", "500g"),
                StructuredIngredient::new("Tomatoes", "3 pieces"),
            ]
        );
    }

    #[test]
    fn test_substring_matches() {
        assert!(is_household_staple("Unsalted BUTTER"));
        assert!(is_household_staple("smoked paprika"));
        assert!(is_household_staple("all-purpose flour"));
        assert!(is_household_staple("fresh basil leaves"));
        assert!(!is_household_staple("salmon fillet"));
    }
}

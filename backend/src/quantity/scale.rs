//! Serving-count scaling.

use super::{
    format_amount, parse_amount, pluralize_label, QuantityValue, COUNT, LEADING_NUMBER, MULTIPLIED,
};
use crate::models::StructuredIngredient;

/// Multiply a quantity by `servings`.
///
/// One serving (or fewer) is the identity. `"as needed"` has nothing to
/// scale. A quantity without a leading number becomes `"{servings}x {quantity}"`.
pub fn scale(quantity: &str, servings: u32) -> String {
    if servings <= 1 {
        return quantity.to_string();
    }
    let factor = f64::from(servings);

    match QuantityValue::parse(quantity) {
        QuantityValue::Unitless => return quantity.to_string(),
        QuantityValue::Multiplied { factor: n, base } => {
            return match n.checked_mul(u64::from(servings)) {
                Some(total) => format!("{}x {}", total, base),
                None => lossy(quantity, servings),
            };
        }
        QuantityValue::Composite(_) => return lossy(quantity, servings),
        _ => {}
    }

    // A multiplier too large to parse is not a number followed by "x ...".
    if MULTIPLIED.is_match(quantity) {
        return lossy(quantity, servings);
    }

    if let Some(caps) = COUNT.captures(quantity) {
        if let Ok(count) = caps[1].parse::<f64>() {
            let total = count * factor;
            return format!("{} {}", format_amount(total), pluralize_label(&caps[2], total));
        }
    }

    if let Some(caps) = LEADING_NUMBER.captures(quantity) {
        if let Some(amount) = parse_amount(&caps[1]) {
            return format!("{} {}", format_amount(amount * factor), &caps[2])
                .trim()
                .to_string();
        }
    }

    lossy(quantity, servings)
}

fn lossy(quantity: &str, servings: u32) -> String {
    format!("{}x {}", servings, quantity)
}

/// Scale every ingredient of a dish. Ingredients without a name are dropped.
pub fn scale_ingredients(ingredients: Vec<StructuredIngredient>, servings: u32) -> Vec<StructuredIngredient> {
    if servings <= 1 {
        return ingredients;
    }

    ingredients
        .into_iter()
        .filter(|i| !i.name.trim().is_empty())
        .map(|i| StructuredIngredient {
            quantity: scale(&i.quantity, servings),
            name: i.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_serving_is_identity() {
        for q in ["300 g", "as needed", "2 cups + 300g", "a handful", "1 piece", "3x onion", ""] {
            assert_eq!(scale(q, 1), q);
            assert_eq!(scale(q, 0), q);
        }
    }

    #[test]
    fn test_scale_numeric() {
        assert_eq!(scale("500g", 2), "1000 g");
        assert_eq!(scale("250 ml", 3), "750 ml");
        assert_eq!(scale("0.5 kg", 3), "1.5 kg");
        assert_eq!(scale("2", 4), "8");
        assert_eq!(scale("2 cloves", 2), "4 cloves");
    }

    #[test]
    fn test_scale_counts_pluralizes_piece() {
        assert_eq!(scale("1 piece", 3), "3 pieces");
        assert_eq!(scale("2 large", 2), "4 large");
    }

    #[test]
    fn test_as_needed_is_not_scaled() {
        assert_eq!(scale("as needed", 4), "as needed");
    }

    #[test]
    fn test_unparsable_falls_back_to_multiplier() {
        assert_eq!(scale("a handful", 3), "3x a handful");
        assert_eq!(scale("1 cup + 200g", 2), "2x 1 cup + 200g");
    }

    #[test]
    fn test_multiplied_form_scales_its_factor() {
        assert_eq!(scale("3x a handful", 2), "6x a handful");
    }

    #[test]
    fn test_multiplier_overflow_falls_back() {
        assert_eq!(scale("18446744073709551615x onion", 2), "2x 18446744073709551615x onion");
        assert_eq!(scale("99999999999999999999x onion", 3), "3x 99999999999999999999x onion");
    }

    #[test]
    fn test_scale_bare_fraction() {
        assert_eq!(scale("1/2", 2), "1");
        assert_eq!(scale("1/4 head", 3), "0.75 head");
    }

    #[test]
    fn test_scale_ingredients_keeps_order_and_names() {
        let scaled = scale_ingredients(
            vec![
                StructuredIngredient::new("Chicken breast", "500g"),
                StructuredIngredient::new("", "1 piece"),
                StructuredIngredient::as_needed("Parsley"),
            ],
            2,
        );
        assert_eq!(
            scaled,
            vec![
                StructuredIngredient::new("Chicken breast", "1000 g"),
                StructuredIngredient::as_needed("Parsley"),
            ]
        );
    }
}

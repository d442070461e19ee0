//! Metric normalization of free-text quantities.
//!
//! Conversions are an ordered table of `(pattern, handler)` rules; the first
//! rule whose pattern is found in the quantity wins. Results are truncated to
//! whole grams/millilitres.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{parse_amount, AS_NEEDED};
use crate::lexicon::{contains_any, AS_NEEDED_ESTIMATES, LIQUID_KEYWORDS};

/// Millilitres in a cup, for liquids.
const CUP_ML: f64 = 240.0;
/// Grams in a cup, for everything else.
const CUP_G: f64 = 150.0;
const TBSP_ML: f64 = 15.0;
const TSP_ML: f64 = 5.0;
const OZ_G: f64 = 28.0;
const LB_G: f64 = 454.0;

/// A single conversion rule.
pub struct ConversionRule {
    pub name: &'static str,
    pattern: Regex,
    convert: fn(name: &str, amount: f64) -> String,
}

impl ConversionRule {
    fn new(name: &'static str, unit_pattern: &str, convert: fn(&str, f64) -> String) -> Self {
        let pattern = Regex::new(&format!(r"(?i)(\d+(?:\.\d+)?(?:/\d+)?)\s*{}", unit_pattern))
            .expect("valid conversion pattern");
        Self { name, pattern, convert }
    }

    fn apply(&self, name: &str, quantity: &str) -> Option<String> {
        let caps = self.pattern.captures(quantity)?;
        let amount = parse_amount(&caps[1])?;
        Some((self.convert)(name, amount))
    }
}

/// Conversion rules in priority order.
pub static CONVERSION_RULES: Lazy<Vec<ConversionRule>> = Lazy::new(|| {
    vec![
        ConversionRule::new("cup", r"cups?", |name, n| {
            if contains_any(name, LIQUID_KEYWORDS) {
                format!("{}ml", truncate(n * CUP_ML))
            } else {
                format!("{}g", truncate(n * CUP_G))
            }
        }),
        ConversionRule::new("tablespoon", r"(?:tbsp|tablespoons?)", |_, n| {
            format!("{}ml", truncate(n * TBSP_ML))
        }),
        ConversionRule::new("teaspoon", r"(?:tsp|teaspoons?)", |_, n| {
            format!("{}ml", truncate(n * TSP_ML))
        }),
        ConversionRule::new("ounce", r"(?:oz|ounces?)", |_, n| format!("{}g", truncate(n * OZ_G))),
        ConversionRule::new("pound", r"(?:lb|pounds?)", |_, n| format!("{}g", truncate(n * LB_G))),
    ]
});

fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// Convert a quantity to metric/count form.
///
/// `"as needed"` is replaced by a keyword estimate on `name` when one applies.
/// A quantity no rule recognizes is returned unchanged.
pub fn standardize(name: &str, quantity: &str) -> String {
    if quantity.trim() == AS_NEEDED {
        return estimate_as_needed(name).unwrap_or(quantity).to_string();
    }

    CONVERSION_RULES
        .iter()
        .find_map(|rule| rule.apply(name, quantity))
        .unwrap_or_else(|| quantity.to_string())
}

/// Name of the rule [`standardize`] would apply, if any.
pub fn matching_rule(quantity: &str) -> Option<&'static str> {
    CONVERSION_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(quantity))
        .map(|rule| rule.name)
}

fn estimate_as_needed(name: &str) -> Option<&'static str> {
    AS_NEEDED_ESTIMATES
        .iter()
        .find(|(keywords, _)| contains_any(name, keywords))
        .map(|(_, estimate)| *estimate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize_measurement() {
        let cases = [
            ("chicken", "2 cups", "300g"),
            ("milk", "1 cup", "240ml"),
            ("sauce", "3 tbsp", "45ml"),
            ("spice", "2 tsp", "10ml"),
            ("meat", "16 oz", "448g"),
            ("beef", "2 lb", "908g"),
            ("tomato", "as needed", "100g"),
            ("chicken", "as needed", "250g"),
        ];

        for (name, quantity, expected) in cases {
            assert_eq!(standardize(name, quantity), expected, "Failed for {name}, {quantity}");
        }
    }

    #[test]
    fn test_as_needed_estimates_by_priority() {
        assert_eq!(standardize("salmon fillet", "as needed"), "200g");
        // Meat keywords win over produce keywords.
        assert_eq!(standardize("beef and potato", "as needed"), "250g");
        assert_eq!(standardize("Carrots", "as needed"), "100g");
        assert_eq!(standardize("parsley", "as needed"), "as needed");
    }

    #[test]
    fn test_results_are_truncated() {
        assert_eq!(standardize("flour", "1.5 cups"), "225g");
        assert_eq!(standardize("cream", "0.3 oz"), "8g");
        assert_eq!(standardize("stock", "1/2 cup"), "120ml");
    }

    #[test]
    fn test_unit_words_and_case() {
        assert_eq!(standardize("honey", "2 Tablespoons"), "30ml");
        assert_eq!(standardize("yeast", "1 teaspoon"), "5ml");
        assert_eq!(standardize("cheese", "4 ounces"), "112g");
        assert_eq!(standardize("pork", "1 pound"), "454g");
    }

    #[test]
    fn test_unrecognized_quantity_is_unchanged() {
        assert_eq!(standardize("lettuce", "1 head"), "1 head");
        assert_eq!(standardize("garlic", "2 cloves"), "2 cloves");
        assert_eq!(standardize("onion", "500g"), "500g");
        assert_eq!(standardize("salt", "a pinch"), "a pinch");
    }

    #[test]
    fn test_matching_rule() {
        assert_eq!(matching_rule("2 cups"), Some("cup"));
        assert_eq!(matching_rule("1 tbsp"), Some("tablespoon"));
        assert_eq!(matching_rule("3 tsp"), Some("teaspoon"));
        assert_eq!(matching_rule("300 g"), None);
    }
}

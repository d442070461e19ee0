//! Raw ingredient-list parsing.
//!
//! Splits the free-text ingredient column of the dish cache into
//! (name, quantity) pairs. Never fails: a token without a leading amount
//! becomes a whole-token name with an `"as needed"` quantity.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::StructuredIngredient;

/// Token separators, applied in order.
const SEPARATORS: [char; 2] = [';', ','];

/// `<amount>[unit] <name>`, amount may be a decimal or a fraction.
static INGREDIENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?(?:/\d+)?)\s*([a-zA-Z]+)?\s+(.+)$").expect("valid regex")
});

/// Split a raw ingredient string into tokens.
///
/// Splits on `;` first, then each piece on `,`; tokens are trimmed and
/// empty ones dropped.
pub fn tokenize(raw: &str) -> Vec<&str> {
    let mut parts = vec![raw];
    for separator in SEPARATORS {
        parts = parts
            .into_iter()
            .flat_map(|p| p.split(separator))
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
    }
    parts
}

/// Parse one token into an ingredient.
pub fn parse_token(token: &str) -> StructuredIngredient {
    match INGREDIENT.captures(token) {
        Some(caps) => {
            let amount = &caps[1];
            let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            StructuredIngredient::new(&caps[3], format!("{} {}", amount, unit).trim())
        }
        None => StructuredIngredient::as_needed(token),
    }
}

/// Parse a raw ingredient list.
///
/// # Example
/// ```ignore
/// use mealcart::parser::parse_ingredients;
///
/// let items = parse_ingredients("500g ground beef; 2 large onions, garlic");
/// assert_eq!(items[0].name, "ground beef");
/// assert_eq!(items[0].quantity, "500 g");
/// assert_eq!(items[2].quantity, "as needed");
/// ```
pub fn parse_ingredients(raw: &str) -> Vec<StructuredIngredient> {
    tokenize(raw).into_iter().map(parse_token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_unit_name() {
        let item = parse_token("500g ground beef");
        assert_eq!(item.name, "ground beef");
        assert_eq!(item.quantity, "500 g");

        let item = parse_token("2 cups milk");
        assert_eq!(item.name, "milk");
        assert_eq!(item.quantity, "2 cups");
    }

    #[test]
    fn test_amount_without_unit() {
        let item = parse_token("1 onion");
        assert_eq!(item.name, "onion");
        assert_eq!(item.quantity, "1");
    }

    #[test]
    fn test_size_word_is_read_as_unit() {
        let item = parse_token("2 large onions");
        assert_eq!(item.name, "onions");
        assert_eq!(item.quantity, "2 large");
    }

    #[test]
    fn test_fraction_amount() {
        let item = parse_token("1/2 cup cream");
        assert_eq!(item.name, "cream");
        assert_eq!(item.quantity, "1/2 cup");
    }

    #[test]
    fn test_no_leading_number_is_as_needed() {
        let item = parse_token("ground beef 500g");
        assert_eq!(item.name, "ground beef 500g");
        assert_eq!(item.quantity, "as needed");

        let item = parse_token("12");
        assert_eq!(item.name, "12");
        assert_eq!(item.quantity, "as needed");
    }

    #[test]
    fn test_tokenize_splits_semicolons_then_commas() {
        let tokens = tokenize("beef 500g; tomatoes, onion ;; , garlic 2 cloves;");
        assert_eq!(tokens, vec!["beef 500g", "tomatoes", "onion", "garlic 2 cloves"]);
    }

    #[test]
    fn test_parse_ingredients() {
        let items = parse_ingredients("ground beef 500g; tomatoes 400g; onion 1; garlic 2 cloves");
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["ground beef 500g", "tomatoes 400g", "onion 1", "garlic 2 cloves"]);
        assert!(items.iter().all(|i| i.quantity == "as needed"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_ingredients("").is_empty());
        assert!(parse_ingredients(" ; , ").is_empty());
    }
}

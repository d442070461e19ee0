//! Prompt generation for ingredient suggestions
//!
//! The system prompt carries the policy (fresh items only, metric units, no
//! household staples) and the item schema; the user prompt names the dish.

use serde_json::Value;

/// The suggestion item JSON schema (embedded at compile time)
const SUGGESTION_SCHEMA: &str = include_str!("../../schemas/ingredient-suggestion.json");

/// Generate the system prompt for ingredient suggestions
pub fn system_prompt() -> String {
    format!(
        r#"You are a grocery planning assistant. Your task is to list the fresh ingredients a shopper must buy to cook a given dish.

## Guidelines

1. Include ONLY fresh produce: meat, fish, vegetables, fruits and dairy
2. EXCLUDE common household items like oil, salt, pepper, spices, flour, sugar, vinegar and sauces
3. Use METRIC measurements: grams (g) for solids and milliliters (ml) for liquids
4. For meat and fish, give the quantity in grams (e.g. "250g")
5. For produce, give the quantity in grams or by count (e.g. "2 large" or "150g")
6. Do NOT use cups, tablespoons or teaspoons

## CRITICAL: Output Format

Return a JSON array. Every element MUST match this schema:

```json
{item_schema}
```

Example:

```json
[
  {{"name": "chicken breast", "quantity": "500g"}},
  {{"name": "bell peppers", "quantity": "2 pieces"}},
  {{"name": "tomatoes", "quantity": "300g"}},
  {{"name": "onion", "quantity": "1 large"}}
]
```

Return ONLY the JSON array, no explanations. If you do not know the dish or it has no fresh ingredients, return an empty array: []"#,
        item_schema = SUGGESTION_SCHEMA
    )
}

/// Generate the user prompt naming the dish
pub fn user_prompt(dish_name: &str) -> String {
    format!(
        "List ONLY the fresh ingredients for the dish: \"{}\".",
        dish_name.trim()
    )
}

/// Build the messages array for one suggestion request
pub fn build_messages(dish_name: &str) -> Vec<Value> {
    vec![serde_json::json!({
        "role": "user",
        "content": user_prompt(dish_name)
    })]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_contains_policy_and_schema() {
        let prompt = system_prompt();
        assert!(prompt.contains("ONLY fresh produce"));
        assert!(prompt.contains("Do NOT use cups"));
        assert!(prompt.contains("\"required\""));
        assert!(prompt.contains("{\"name\": \"onion\", \"quantity\": \"1 large\"}"));
    }

    #[test]
    fn test_user_prompt_names_dish() {
        let prompt = user_prompt("  Beef Wellington ");
        assert!(prompt.contains("\"Beef Wellington\""));
    }

    #[test]
    fn test_build_messages() {
        let messages = build_messages("Paella");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert!(messages[0]["content"].as_str().unwrap().contains("Paella"));
    }

    #[test]
    fn test_item_schema_is_valid_json() {
        let schema: Value = serde_json::from_str(SUGGESTION_SCHEMA).expect("Schema should be valid JSON");
        assert!(schema.get("properties").is_some());
    }
}

//! JSON Schema validation for suggestion service replies.
//!
//! The suggestion service answers with free text that should contain a JSON
//! array of `{ "name", "quantity" }` objects. Each item is checked against an
//! embedded JSON Schema (Draft 7) before it is trusted.
//!
//! # Embedded Schemas
//!
//! Schemas are embedded at compile time from the `schemas/` directory:
//! - `ingredient-suggestion.json`
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use mealcart::validation::{is_valid_suggestion_item, validate_suggestion_item};
//!
//! let item = json!({ "name": "chicken thighs", "quantity": "500g" });
//! assert!(validate_suggestion_item(&item).is_ok());
//!
//! assert!(!is_valid_suggestion_item(&json!({ "name": "salmon" })));
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

const SUGGESTION_SCHEMA_SRC: &str = include_str!("../../schemas/ingredient-suggestion.json");

static SUGGESTION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(SUGGESTION_SCHEMA_SRC).unwrap_or_else(|_| Value::Bool(false))
});

/// Validate a JSON value against a JSON schema.
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(Vec<String>)` with every validation error otherwise
///
/// # Example
/// ```ignore
/// use serde_json::json;
/// use mealcart::validation::validate;
///
/// let schema = json!({
///     "type": "object",
///     "required": ["name"],
///     "properties": {
///         "name": { "type": "string" }
///     }
/// });
///
/// assert!(validate(&schema, &json!({ "name": "leek" })).is_ok());
/// assert!(validate(&schema, &json!({ "weight": 42 })).is_err());
/// ```
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Boolean form of [`validate`].
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// The embedded ingredient suggestion schema.
pub fn suggestion_schema() -> &'static Value {
    &SUGGESTION_SCHEMA
}

/// Validate one suggested ingredient.
pub fn validate_suggestion_item(item: &Value) -> Result<(), Vec<String>> {
    validate(suggestion_schema(), item)
}

/// Quick check of one suggested ingredient.
pub fn is_valid_suggestion_item(item: &Value) -> bool {
    is_valid(suggestion_schema(), item)
}

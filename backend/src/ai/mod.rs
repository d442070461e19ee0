//! AI module for generated ingredient lists
//!
//! Uses the Anthropic Messages API to list the fresh ingredients of dishes
//! that are neither cached nor aliased.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mealcart::ai::{AiClient, IngredientSuggester};
//! use mealcart::AppConfig;
//!
//! let client = AiClient::from_config(&AppConfig::from_env()?).ok_or("ANTHROPIC_API_KEY not set")?;
//! let ingredients = client.suggest("Beef Wellington").await?;
//! ```
//!
//! Each request is a single attempt bounded by a timeout. Replies are free
//! text; the JSON array inside is extracted and every element is checked
//! against `schemas/ingredient-suggestion.json`.

pub mod prompt;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::{AppConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::error::{AiError, AiResult};
use crate::logs::{log_info_indent, log_warning};
use crate::models::StructuredIngredient;
use crate::validation::validate_suggestion_item;

pub use prompt::{build_messages, system_prompt, user_prompt};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Source of generated ingredient lists for unknown dishes.
#[async_trait]
pub trait IngredientSuggester: Send + Sync {
    /// Fresh ingredients for `dish_name`, metric quantities, staples excluded.
    async fn suggest(&self, dish_name: &str) -> AiResult<Vec<StructuredIngredient>>;
}

/// Anthropic API client
#[derive(Clone)]
pub struct AiClient {
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

/// Anthropic API response structure
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

/// Anthropic API error response
#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl AiClient {
    /// Create a new client with explicit API key
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a client from loaded configuration. `None` without an API key.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let api_key = config.api_key.clone().filter(|k| !k.trim().is_empty())?;
        Some(
            Self::new(api_key)
                .with_model(&config.model)
                .with_max_tokens(config.max_tokens)
                .with_timeout(config.request_timeout),
        )
    }

    /// Set the model to use
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Call Anthropic API once and return the reply text
    async fn call_api(&self, dish_name: &str) -> AiResult<String> {
        log_info_indent(format!("Calling Anthropic API ({})", self.model), 1);

        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        let request_body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": 0,
            "system": prompt::system_prompt(),
            "messages": prompt::build_messages(dish_name)
        });

        let response = client
            .post(MESSAGES_URL)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<AnthropicError>(&body) {
                return Err(AiError::ApiError(error.error.message));
            }
            return Err(AiError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        let response: AnthropicResponse =
            serde_json::from_str(&body).map_err(|e| AiError::InvalidResponse(e.to_string()))?;

        let text = response
            .content
            .iter()
            .filter(|c| c.content_type == "text")
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }

        log_info_indent(format!("Received {} bytes", text.len()), 1);
        Ok(text)
    }
}

#[async_trait]
impl IngredientSuggester for AiClient {
    async fn suggest(&self, dish_name: &str) -> AiResult<Vec<StructuredIngredient>> {
        let text = self.call_api(dish_name).await?;
        parse_suggestions(&text)
    }
}

/// Turn a free-text reply into validated ingredients.
///
/// Elements failing the item schema are dropped; nothing usable is
/// [`AiError::EmptyResponse`].
pub fn parse_suggestions(response: &str) -> AiResult<Vec<StructuredIngredient>> {
    let json_str = extract_json_array(response).ok_or_else(|| {
        AiError::InvalidResponse(format!(
            "No JSON array in response: {}",
            response.chars().take(200).collect::<String>()
        ))
    })?;

    let items: Vec<Value> =
        serde_json::from_str(json_str).map_err(|e| AiError::InvalidResponse(e.to_string()))?;

    let mut ingredients = Vec::with_capacity(items.len());
    for item in &items {
        if let Err(errors) = validate_suggestion_item(item) {
            log_warning(format!("Dropping suggested item {}: {}", item, errors.join("; ")));
            continue;
        }
        match serde_json::from_value::<StructuredIngredient>(item.clone()) {
            Ok(ingredient) => ingredients.push(StructuredIngredient::new(
                ingredient.name.trim(),
                ingredient.quantity.trim(),
            )),
            Err(e) => log_warning(format!("Dropping suggested item {}: {}", item, e)),
        }
    }

    if ingredients.is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(ingredients)
}

/// Extract a JSON array from a response that may contain markdown code blocks
fn extract_json_array(text: &str) -> Option<&str> {
    // Code block first, the array may be preceded by prose containing brackets
    if let Some(start) = text.find("```") {
        let after_start = start + 3;
        let content_start = text[after_start..]
            .find('\n')
            .map(|i| after_start + i + 1)
            .unwrap_or(after_start);

        if let Some(end) = text[content_start..].find("```") {
            let block = text[content_start..content_start + end].trim();
            if block.starts_with('[') {
                return Some(block);
            }
        }
    }

    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

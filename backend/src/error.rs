//! Error types for the Mealcart pipeline.
//!
//! This module defines one error type per concern:
//!
//! - [`StoreError`] - Dish cache and alias store errors
//! - [`AiError`] - Ingredient suggestion service errors
//! - [`ConfigError`] - Environment configuration errors
//! - [`AppError`] - Top-level errors surfaced by the CLI
//!
//! None of these cross the `resolve` / `combine_dishes` boundary: a failing
//! suggestion call or alias lookup degrades to a resolution miss. They are
//! returned only while loading stores at startup and while handling CLI input.

use thiserror::Error;

// =============================================================================
// Store Errors
// =============================================================================

/// Errors while loading the dish cache or reading/writing the alias store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read or write a file.
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid JSON content.
    #[error("Store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid CSV content.
    #[error("Invalid CSV: {0}")]
    Csv(String),

    /// Empty source file.
    #[error("Dish cache file is empty")]
    EmptyFile,

    /// Required column missing from the header row.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Unsupported dish cache file format.
    #[error("Unsupported dish cache format: {0}")]
    UnsupportedFormat(String),
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        StoreError::Csv(e.to_string())
    }
}

// =============================================================================
// Suggestion Service Errors
// =============================================================================

/// Errors from the external ingredient suggestion service.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// Request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Non-success response from the API.
    #[error("API error: {0}")]
    ApiError(String),

    /// Response body could not be interpreted.
    #[error("Invalid AI response: {0}")]
    InvalidResponse(String),

    /// Response contained no usable ingredient.
    #[error("AI response contained no usable ingredients")]
    EmptyResponse,
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AiError::Timeout
        } else {
            AiError::RequestFailed(e.to_string())
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Application Errors (top-level)
// =============================================================================

/// Top-level errors for the command line driver.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Suggestion service error.
    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid user input.
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for suggestion service operations.
pub type AiResult<T> = Result<T, AiError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for CLI operations.
pub type AppResult<T> = Result<T, AppError>;

//! Application configuration.
//!
//! Defaults live in constants below; every value can be overridden from the
//! environment (or a `.env` file) via [`AppConfig::from_env`].

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Directory holding the dish cache and alias store.
pub const DEFAULT_DATA_DIR: &str = ".mealcart";

/// Dish cache file name inside the data directory.
pub const DISH_CACHE_FILE: &str = "dishes.csv";

/// Alias store file name inside the data directory.
pub const ALIAS_STORE_FILE: &str = "aliases.json";

/// Model used for generated ingredient lists.
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

/// Token budget for one suggestion reply.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Upper bound on one suggestion request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Number of dish names offered when a dish cannot be resolved.
pub const DEFAULT_SUGGESTION_COUNT: usize = 5;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub dish_cache_path: PathBuf,
    pub alias_store_path: PathBuf,
    /// `None` disables the generated resolution tier.
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub request_timeout: Duration,
    pub suggestion_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from(DEFAULT_DATA_DIR);
        Self {
            dish_cache_path: data_dir.join(DISH_CACHE_FILE),
            alias_store_path: data_dir.join(ALIAS_STORE_FILE),
            data_dir,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            suggestion_count: DEFAULT_SUGGESTION_COUNT,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("MEALCART_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let dish_cache_path = lookup("MEALCART_DISH_CACHE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DISH_CACHE_FILE));
        let alias_store_path = lookup("MEALCART_ALIAS_STORE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(ALIAS_STORE_FILE));

        let api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        let model = lookup("MEALCART_MODEL").unwrap_or(defaults.model);
        let max_tokens = parse_var(&lookup, "MEALCART_MAX_TOKENS", defaults.max_tokens)?;
        let timeout_secs = parse_var(&lookup, "MEALCART_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let suggestion_count =
            parse_var(&lookup, "MEALCART_SUGGESTIONS", defaults.suggestion_count)?;

        Ok(Self {
            data_dir,
            dish_cache_path,
            alias_store_path,
            api_key,
            model,
            max_tokens,
            request_timeout: Duration::from_secs(timeout_secs),
            suggestion_count,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> ConfigResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

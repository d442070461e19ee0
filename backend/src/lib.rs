//! # Mealcart - Dish ingredient resolution and grocery list aggregation
//!
//! Mealcart turns a list of requested dishes into one consolidated,
//! metric-normalized grocery list grouped by food category.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Dishes    │────▶│  Resolver   │────▶│  Quantity   │────▶│  Grouped    │
//! │ (+servings) │     │ cache/alias │     │ scale/merge │     │  + pantry   │
//! └─────────────┘     │    /AI      │     └─────────────┘     └─────────────┘
//!                     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mealcart::{AggregationPipeline, DishCache, DishRequest, DishResolver, MemoryAliasStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = DishCache::load("dishes.csv").unwrap();
//!     let resolver = DishResolver::new(cache, Arc::new(MemoryAliasStore::new()));
//!     let pipeline = AggregationPipeline::new(Arc::new(resolver));
//!
//!     let result = pipeline.combine_dishes(&[DishRequest::new("Chicken Curry", 2)]).await;
//!     println!("{} grocery lines", result.item_count());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per concern
//! - [`config`] - Environment configuration
//! - [`logs`] - Broadcast logging
//! - [`models`] - Requests, ingredients, results
//! - [`lexicon`] - Keyword lists
//! - [`quantity`] - Quantity parsing, normalization, scaling and addition
//! - [`parser`] - Raw ingredient-list parsing
//! - [`validation`] - JSON schema validation of suggestion replies
//! - [`cache`] - Dish cache and alias store
//! - [`ai`] - AI-generated ingredient lists
//! - [`resolver`] - Three-tier dish resolution
//! - [`transform`] - Freshness filter, grouping and the aggregation pipeline

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Quantities and parsing
pub mod lexicon;
pub mod parser;
pub mod quantity;

// Validation
pub mod validation;

// Stores
pub mod cache;

// AI
pub mod ai;

// Resolution and aggregation
pub mod resolver;
pub mod transform;

// =============================================================================
// Re-exports - Errors and configuration
// =============================================================================

pub use config::AppConfig;
pub use error::{AiError, AppError, ConfigError, StoreError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AggregationResult,
    CategorizedIngredients,
    Category,
    DishRequest,
    MatchType,
    ResolutionMiss,
    ResolutionResult,
    ResolvedDish,
    StructuredIngredient,
};

// =============================================================================
// Re-exports - Quantities and parsing
// =============================================================================

pub use parser::parse_ingredients;
pub use quantity::{add, combine, scale, scale_ingredients, standardize, QuantityValue, AS_NEEDED};

// =============================================================================
// Re-exports - Stores
// =============================================================================

pub use cache::{AliasStore, DishCache, JsonAliasStore, MemoryAliasStore, StoredAlias};

// =============================================================================
// Re-exports - AI Client
// =============================================================================

pub use ai::{AiClient, IngredientSuggester};

// =============================================================================
// Re-exports - Resolution and pipeline
// =============================================================================

pub use resolver::DishResolver;
pub use transform::{categorize, filter_fresh, separate_pantry, AggregationPipeline};

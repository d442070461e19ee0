//! Transformation module.
//!
//! This module turns resolved dishes into a grocery list:
//! - Freshness: household staple removal for cache-sourced dishes
//! - Grouper: categories and pantry separation
//! - Pipeline: main aggregation pipeline

pub mod freshness;
pub mod grouper;
pub mod pipeline;

pub use freshness::filter_fresh;
pub use grouper::{categorize, categorize_ingredients, is_pantry_item, separate_pantry};
pub use pipeline::AggregationPipeline;

//! High-level pipeline API for grocery list aggregation.
//!
//! This module combines every step: resolution, scaling, merging,
//! categorization and pantry separation.
//!
//! # Example
//!
//! ```rust,ignore
//! use mealcart::{AggregationPipeline, DishRequest, DishResolver};
//!
//! let pipeline = AggregationPipeline::new(resolver);
//! let result = pipeline
//!     .combine_dishes(&[DishRequest::new("Chicken Curry", 2), DishRequest::new("Caesar Salad", 1)])
//!     .await;
//!
//! println!("{} items across {} dishes", result.item_count(), result.dishes.len());
//! ```

use std::sync::Arc;

use super::grouper::{categorize_ingredients, separate_pantry};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{AggregationResult, DishRequest, ResolutionResult, StructuredIngredient};
use crate::quantity::combine;
use crate::resolver::DishResolver;

/// Builds one grocery list from many dish requests.
pub struct AggregationPipeline {
    resolver: Arc<DishResolver>,
}

impl AggregationPipeline {
    pub fn new(resolver: Arc<DishResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &DishResolver {
        &self.resolver
    }

    /// Resolve every request and merge the results into one grocery list.
    ///
    /// Requests are handled in order. Blank names are skipped; unresolved
    /// names are reported in `missing_dishes`. `success` is `true` when at
    /// least one dish resolved.
    pub async fn combine_dishes(&self, requests: &[DishRequest]) -> AggregationResult {
        log_info(format!("🛒 Combining {} dish request(s)...", requests.len()));

        let mut all_ingredients: Vec<StructuredIngredient> = Vec::new();
        let mut dishes = Vec::new();
        let mut missing_dishes = Vec::new();

        for request in requests {
            if request.name.trim().is_empty() {
                continue;
            }

            match self.resolver.resolve(&request.name, request.servings).await {
                ResolutionResult::Resolved(dish) => {
                    log_info_indent(
                        format!(
                            "{} x{}: {} ingredient(s) ({:?})",
                            dish.dish,
                            request.servings,
                            dish.ingredients.len(),
                            dish.match_type
                        ),
                        1,
                    );
                    dishes.push(dish.dish);
                    all_ingredients.extend(dish.ingredients);
                }
                ResolutionResult::Miss(_) => missing_dishes.push(request.name.clone()),
            }
        }

        let combined = combine(all_ingredients);
        let (items_by_category, pantry_items) = separate_pantry(categorize_ingredients(combined));

        let result = AggregationResult {
            success: !dishes.is_empty(),
            dishes,
            missing_dishes,
            items_by_category,
            pantry_items,
        };
        print_summary(&result);
        result
    }
}

/// Print aggregation summary
fn print_summary(result: &AggregationResult) {
    if result.success {
        log_success(format!(
            "{} item(s) from {} dish(es), {} in pantry",
            result.item_count(),
            result.dishes.len(),
            result.pantry_items.len()
        ));
    }
    if !result.missing_dishes.is_empty() {
        log_warning(format!("Missing: {}", result.missing_dishes.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{DishCache, MemoryAliasStore};
    use crate::models::Category;

    fn pipeline() -> AggregationPipeline {
        let cache = DishCache::from_entries([
            ("Chicken Curry", "500g chicken breast; 2 large onions; 200 ml coconut milk; 1 cup rice"),
            ("Chicken Salad", "1kg chicken breast, 1 head lettuce, 2 large onions, 1 tbsp olive oil"),
            ("Tomato Soup", "800g tomatoes; 500ml vegetable stock"),
        ]);
        let resolver = DishResolver::new(cache, Arc::new(MemoryAliasStore::new()));
        AggregationPipeline::new(Arc::new(resolver))
    }

    #[tokio::test]
    async fn test_empty_input() {
        let result = pipeline().combine_dishes(&[]).await;
        assert!(!result.success);
        assert!(result.dishes.is_empty());
        assert!(result.items_by_category.is_empty());
        assert!(result.pantry_items.is_empty());
    }

    #[tokio::test]
    async fn test_all_missing() {
        let result = pipeline()
            .combine_dishes(&[DishRequest::new("Lasagna", 2), DishRequest::new("Paella", 1)])
            .await;
        assert!(!result.success);
        assert!(result.dishes.is_empty());
        assert_eq!(result.missing_dishes, vec!["Lasagna", "Paella"]);
    }

    #[tokio::test]
    async fn test_merges_across_dishes() {
        let result = pipeline()
            .combine_dishes(&[
                DishRequest::new("Chicken Curry", 1),
                DishRequest::new("chicken salad", 1),
                DishRequest::new("Lasagna", 1),
            ])
            .await;

        assert!(result.success);
        assert_eq!(result.dishes, vec!["chicken curry", "chicken salad"]);
        assert_eq!(result.missing_dishes, vec!["Lasagna"]);

        let meat = &result.items_by_category[&Category::Meat];
        assert_eq!(meat, &vec![StructuredIngredient::new("chicken breast", "1.5 kg")]);

        let produce = &result.items_by_category[&Category::Produce];
        assert!(produce.contains(&StructuredIngredient::new("onions", "4 large")));
        assert!(produce.contains(&StructuredIngredient::new("lettuce", "1 head")));

        // Rice is categorized as a grain, then moved to the pantry.
        assert!(!result.items_by_category.contains_key(&Category::Grains));
        assert_eq!(result.pantry_items, vec![StructuredIngredient::new("rice", "150g")]);
    }

    #[tokio::test]
    async fn test_servings_scale_before_merge() {
        let result = pipeline()
            .combine_dishes(&[DishRequest::new("Tomato Soup", 2), DishRequest::new("tomato soup", 1)])
            .await;

        assert_eq!(result.dishes, vec!["tomato soup", "tomato soup"]);
        // Same-unit addition keeps the unit; only cross-unit merges rescale.
        let produce = &result.items_by_category[&Category::Produce];
        assert_eq!(produce, &vec![StructuredIngredient::new("tomatoes", "2400 g")]);
        assert_eq!(result.pantry_items, vec![StructuredIngredient::new("vegetable stock", "1500 ml")]);
    }

    #[tokio::test]
    async fn test_blank_requests_are_skipped() {
        let result = pipeline()
            .combine_dishes(&[DishRequest::new("  ", 1), DishRequest::new("Tomato Soup", 1)])
            .await;
        assert!(result.success);
        assert!(result.missing_dishes.is_empty());
        assert_eq!(result.dishes, vec!["tomato soup"]);
    }
}

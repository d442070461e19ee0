//! Dish name resolution.
//!
//! Resolution tries, in order:
//!
//! 1. **Exact** - case-insensitive lookup in the dish cache
//! 2. **Mapped** - alias store lookup, then a cache lookup of the canonical name
//! 3. **Generated** - the ingredient suggestion service, if one is configured
//!
//! Cache-sourced ingredients go through the freshness filter and metric
//! normalization; generated ones are used as returned. Store and service
//! failures are logged and fall through to the next tier. When every tier
//! misses, the caller gets the first few cached dish names as suggestions.

use std::sync::{Arc, RwLock};

use crate::ai::IngredientSuggester;
use crate::cache::{AliasStore, DishCache};
use crate::config::DEFAULT_SUGGESTION_COUNT;
use crate::logs::{log_error, log_info, log_success, log_warning};
use crate::models::{MatchType, ResolutionMiss, ResolutionResult, ResolvedDish, StructuredIngredient};
use crate::parser::parse_ingredients;
use crate::quantity::{scale_ingredients, standardize};
use crate::transform::freshness::filter_fresh;

/// Error message of a resolution miss.
pub const NO_MATCH: &str = "No matching dish found";

/// Note attached to generated resolutions.
pub const GENERATED_NOTE: &str = "Fresh ingredients generated by AI";

/// Resolves dish names to ingredient lists.
pub struct DishResolver {
    cache: RwLock<Arc<DishCache>>,
    aliases: Arc<dyn AliasStore>,
    suggester: Option<Arc<dyn IngredientSuggester>>,
    suggestion_count: usize,
}

impl DishResolver {
    /// Resolver over a loaded cache and alias store, without a suggestion service.
    pub fn new(cache: DishCache, aliases: Arc<dyn AliasStore>) -> Self {
        Self {
            cache: RwLock::new(Arc::new(cache)),
            aliases,
            suggester: None,
            suggestion_count: DEFAULT_SUGGESTION_COUNT,
        }
    }

    /// Enable the generated tier.
    pub fn with_suggester(mut self, suggester: Arc<dyn IngredientSuggester>) -> Self {
        self.suggester = Some(suggester);
        self
    }

    /// Number of dish names offered on a miss.
    pub fn with_suggestion_count(mut self, count: usize) -> Self {
        self.suggestion_count = count;
        self
    }

    /// Current cache snapshot. A concurrent reload does not affect it.
    pub fn cache_snapshot(&self) -> Arc<DishCache> {
        let guard = self.cache.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the dish cache.
    pub fn reload_cache(&self, cache: DishCache) {
        let count = cache.len();
        let mut guard = self.cache.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(cache);
        log_success(format!("Dish cache reloaded ({} dishes)", count));
    }

    /// Resolve one dish at one serving.
    pub async fn resolve_single(&self, dish_name: &str) -> ResolutionResult {
        self.resolve(dish_name, 1).await
    }

    /// Resolve one dish and scale its ingredients to `servings`.
    pub async fn resolve(&self, dish_name: &str, servings: u32) -> ResolutionResult {
        let key = dish_name.trim().to_lowercase();
        if key.is_empty() {
            return self.miss();
        }
        let cache = self.cache_snapshot();

        // Tier 1: exact
        if let Some(raw) = cache.get(&key) {
            log_success(format!("\"{}\" found in dish cache", key));
            return resolved(key, from_cache(raw, servings), MatchType::Exact, None);
        }

        // Tier 2: alias
        match self.aliases.lookup(&key) {
            Ok(Some(canonical)) => match cache.get(&canonical) {
                Some(raw) => {
                    log_success(format!("\"{}\" mapped to \"{}\"", key, canonical));
                    return resolved(canonical, from_cache(raw, servings), MatchType::Mapped, None);
                }
                None => log_warning(format!(
                    "Alias \"{}\" points to unknown dish \"{}\"",
                    key, canonical
                )),
            },
            Ok(None) => {}
            Err(e) => log_warning(format!("Alias lookup failed for \"{}\": {}", key, e)),
        }

        // Tier 3: generated
        if let Some(ref suggester) = self.suggester {
            log_info(format!("Generating ingredients for \"{}\"...", dish_name.trim()));
            match suggester.suggest(&key).await {
                Ok(ingredients) if !ingredients.is_empty() => {
                    log_success(format!("Generated {} ingredients", ingredients.len()));
                    return resolved(
                        dish_name.to_string(),
                        scale_ingredients(ingredients, servings),
                        MatchType::Generated,
                        Some(GENERATED_NOTE.to_string()),
                    );
                }
                Ok(_) => log_warning(format!("No ingredients generated for \"{}\"", key)),
                Err(e) => log_error(format!("Ingredient generation failed for \"{}\": {}", key, e)),
            }
        }

        log_warning(format!("No match for \"{}\"", key));
        self.miss()
    }

    /// Map each of `terms` to `dish_name`.
    ///
    /// Returns `false` on the first failed write; earlier terms stay mapped.
    pub fn add_dish_mapping<S: AsRef<str>>(&self, dish_name: &str, terms: &[S]) -> bool {
        let dish_name = dish_name.trim();
        if dish_name.is_empty() {
            log_error("Cannot map terms to an empty dish name");
            return false;
        }

        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            if let Err(e) = self.aliases.upsert(term, dish_name) {
                log_error(format!("Failed to map \"{}\" to \"{}\": {}", term, dish_name, e));
                return false;
            }
            log_success(format!("Mapped \"{}\" -> \"{}\"", term.to_lowercase(), dish_name));
        }
        true
    }

    fn miss(&self) -> ResolutionResult {
        ResolutionResult::Miss(ResolutionMiss {
            error: NO_MATCH.to_string(),
            suggestions: self.cache_snapshot().names(self.suggestion_count),
        })
    }
}

/// Parse, filter, normalize and scale a cached ingredient string.
fn from_cache(raw: &str, servings: u32) -> Vec<StructuredIngredient> {
    let fresh = filter_fresh(parse_ingredients(raw))
        .into_iter()
        .map(|i| StructuredIngredient {
            quantity: standardize(&i.name, &i.quantity),
            name: i.name,
        })
        .collect();
    scale_ingredients(fresh, servings)
}

fn resolved(
    dish: String,
    ingredients: Vec<StructuredIngredient>,
    match_type: MatchType,
    note: Option<String>,
) -> ResolutionResult {
    ResolutionResult::Resolved(ResolvedDish { dish, ingredients, match_type, note })
}

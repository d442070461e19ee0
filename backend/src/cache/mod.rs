//! Dish stores.
//!
//! - [`DishCache`]: immutable snapshot of `dish name -> raw ingredient string`,
//!   loaded once at startup and swapped wholesale on an explicit reload.
//! - [`alias`]: persistent `user term -> canonical dish name` mappings.

pub mod alias;
pub mod loader;

use std::collections::HashMap;
use std::path::Path;

use crate::error::StoreResult;
use loader::DishRow;

pub use alias::{AliasStore, JsonAliasStore, MemoryAliasStore, StoredAlias};

/// Read-only dish table keyed by lowercased dish name.
///
/// Iteration order is load order; a dish listed twice keeps its first
/// position and its last ingredient string.
#[derive(Debug, Clone, Default)]
pub struct DishCache {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl DishCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from `(dish name, raw ingredients)` pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut cache = Self::new();
        for (name, ingredients) in entries {
            cache.insert(name.as_ref(), ingredients.into());
        }
        cache
    }

    /// Load a cache from a `.csv`/`.tsv`/`.txt` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let rows = loader::load_rows(path.as_ref())?;
        Ok(Self::from_rows(rows))
    }

    pub fn from_rows(rows: Vec<DishRow>) -> Self {
        Self::from_entries(rows.into_iter().map(|r| (r.dish_name, r.ingredients)))
    }

    fn insert(&mut self, name: &str, ingredients: String) {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = ingredients,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, ingredients));
            }
        }
    }

    /// Case-insensitive lookup of a dish's raw ingredient string.
    pub fn get(&self, dish_name: &str) -> Option<&str> {
        let key = dish_name.trim().to_lowercase();
        self.index.get(&key).map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, dish_name: &str) -> bool {
        self.get(dish_name).is_some()
    }

    /// First `count` dish names in load order.
    pub fn names(&self, count: usize) -> Vec<String> {
        self.entries.iter().take(count).map(|(k, _)| k.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> DishCache {
        DishCache::from_entries([
            ("Spaghetti Bolognese", "ground beef 500g; tomatoes 400g"),
            ("chicken curry", "chicken breast 600g"),
            ("Caesar Salad", "romaine lettuce 1 head"),
        ])
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let cache = sample();
        assert_eq!(cache.get("SPAGHETTI bolognese"), Some("ground beef 500g; tomatoes 400g"));
        assert_eq!(cache.get("  caesar salad "), Some("romaine lettuce 1 head"));
        assert!(!cache.contains("lasagna"));
    }

    #[test]
    fn test_names_follow_load_order() {
        let cache = sample();
        assert_eq!(cache.names(2), vec!["spaghetti bolognese", "chicken curry"]);
        assert_eq!(cache.names(10).len(), 3);
    }

    #[test]
    fn test_duplicate_keeps_position_and_last_value() {
        let cache = DishCache::from_entries([
            ("Soup", "water"),
            ("Stew", "beef"),
            ("SOUP", "broth"),
        ]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.names(1), vec!["soup"]);
        assert_eq!(cache.get("soup"), Some("broth"));
    }

    #[test]
    fn test_load_from_csv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dishes.csv");
        fs::write(
            &path,
            "dish_name,ingredients\nPancakes,\"200g flour; 2 eggs, 300ml milk\"\n",
        )
        .unwrap();

        let cache = DishCache::load(&path).unwrap();
        assert_eq!(cache.get("pancakes"), Some("200g flour; 2 eggs, 300ml milk"));
    }
}

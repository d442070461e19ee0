//! Alias mapping store.
//!
//! Maps user-facing synonyms ("spag bol") to canonical dish names
//! ("Spaghetti Bolognese"). Terms are lowercased on every path; an upsert of
//! an existing term overwrites it (last write wins).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::StoreResult;

/// Persistent alias lookup and upsert.
pub trait AliasStore: Send + Sync {
    /// Canonical dish name for `term`, if one is mapped.
    fn lookup(&self, term: &str) -> StoreResult<Option<String>>;

    /// Map `term` to `dish_name`, replacing any previous mapping.
    fn upsert(&self, term: &str, dish_name: &str) -> StoreResult<()>;

    /// All mappings, sorted by term.
    fn list(&self) -> StoreResult<Vec<StoredAlias>>;
}

/// A stored alias with metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAlias {
    pub user_term: String,
    pub dish_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl StoredAlias {
    fn new(user_term: String, dish_name: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self { user_term, dish_name, created_at: now.clone(), updated_at: now }
    }
}

fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

fn upsert_into(aliases: &mut HashMap<String, StoredAlias>, term: &str, dish_name: &str) {
    let key = normalize_term(term);
    match aliases.get_mut(&key) {
        Some(existing) => {
            existing.dish_name = dish_name.to_string();
            existing.updated_at = chrono::Utc::now().to_rfc3339();
        }
        None => {
            aliases.insert(key.clone(), StoredAlias::new(key, dish_name.to_string()));
        }
    }
}

fn sorted(aliases: &HashMap<String, StoredAlias>) -> Vec<StoredAlias> {
    let mut list: Vec<StoredAlias> = aliases.values().cloned().collect();
    list.sort_by(|a, b| a.user_term.cmp(&b.user_term));
    list
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// =============================================================================
// In-memory store
// =============================================================================

/// Non-persistent store, for tests and cache-only runs.
#[derive(Debug, Default)]
pub struct MemoryAliasStore {
    aliases: Mutex<HashMap<String, StoredAlias>>,
}

impl MemoryAliasStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        {
            let mut aliases = lock(&store.aliases);
            for (term, dish) in pairs {
                upsert_into(&mut aliases, term, dish);
            }
        }
        store
    }
}

impl AliasStore for MemoryAliasStore {
    fn lookup(&self, term: &str) -> StoreResult<Option<String>> {
        let aliases = lock(&self.aliases);
        Ok(aliases.get(&normalize_term(term)).map(|a| a.dish_name.clone()))
    }

    fn upsert(&self, term: &str, dish_name: &str) -> StoreResult<()> {
        upsert_into(&mut lock(&self.aliases), term, dish_name);
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<StoredAlias>> {
        Ok(sorted(&lock(&self.aliases)))
    }
}

// =============================================================================
// JSON file store
// =============================================================================

/// Alias store persisted as one pretty-printed JSON file.
///
/// The file is rewritten in full on every upsert.
pub struct JsonAliasStore {
    path: PathBuf,
    aliases: Mutex<HashMap<String, StoredAlias>>,
}

impl JsonAliasStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = PathBuf::from(path.as_ref());
        let mut aliases = HashMap::new();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            if !content.trim().is_empty() {
                let stored: Vec<StoredAlias> = serde_json::from_str(&content)?;
                for alias in stored {
                    aliases.insert(normalize_term(&alias.user_term), alias);
                }
            }
        }

        Ok(Self { path, aliases: Mutex::new(aliases) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, aliases: &HashMap<String, StoredAlias>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&sorted(aliases))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl AliasStore for JsonAliasStore {
    fn lookup(&self, term: &str) -> StoreResult<Option<String>> {
        let aliases = lock(&self.aliases);
        Ok(aliases.get(&normalize_term(term)).map(|a| a.dish_name.clone()))
    }

    fn upsert(&self, term: &str, dish_name: &str) -> StoreResult<()> {
        let mut aliases = lock(&self.aliases);
        let previous = aliases.clone();
        upsert_into(&mut aliases, term, dish_name);

        if let Err(e) = self.persist(&aliases) {
            *aliases = previous;
            return Err(e);
        }
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<StoredAlias>> {
        Ok(sorted(&lock(&self.aliases)))
    }
}

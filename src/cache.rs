use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Caller-chosen name for a scenario's cached population.
///
/// Two scenarios that share a key share a cache entry, whatever their code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CacheKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CacheKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// When and how large a cached population was generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub sample_count: usize,
    pub generated_at: DateTime<Utc>,
}

impl CacheMetadata {
    /// Metadata for a population generated now.
    #[must_use]
    pub fn now(sample_count: usize) -> Self {
        Self {
            sample_count,
            generated_at: Utc::now(),
        }
    }
}

/// A stored population and its metadata.
///
/// The population sits behind an `Arc`, so every reader of an entry sees
/// the very same records.
#[derive(Debug)]
pub struct CacheEntry<T> {
    pub population: Arc<Vec<T>>,
    pub metadata: CacheMetadata,
}

impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            population: Arc::clone(&self.population),
            metadata: self.metadata.clone(),
        }
    }
}

/// Populations generated by the Bayesian network engine, keyed by
/// [`CacheKey`].
///
/// Entries live until they are invalidated or the cache is dropped. The map
/// sits behind a lock so a cache can be shared by reference; a poisoned
/// lock reads as empty and ignores writes.
pub struct PopulationCache<T> {
    data: RwLock<HashMap<CacheKey, CacheEntry<T>>>,
}

impl<T> PopulationCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// The entry stored under `key`, if any.
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry<T>> {
        let cache = self.data.read().ok()?;
        cache.get(key).cloned()
    }

    /// Metadata of the entry stored under `key`, if any.
    pub fn metadata(&self, key: &CacheKey) -> Option<CacheMetadata> {
        self.get(key).map(|entry| entry.metadata)
    }

    /// Stores `population` under `key`, replacing any previous entry, and
    /// returns the shared handle that was stored.
    pub fn insert(&self, key: CacheKey, population: Vec<T>) -> Arc<Vec<T>> {
        let population = Arc::new(population);
        let entry = CacheEntry {
            population: Arc::clone(&population),
            metadata: CacheMetadata::now(population.len()),
        };
        if let Ok(mut cache) = self.data.write() {
            debug!(key = %key, sample_count = entry.metadata.sample_count, "caching population");
            cache.insert(key, entry);
        }
        population
    }

    /// Drops the entry for `key`. Returns whether one existed.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let removed = self
            .data
            .write()
            .map(|mut cache| cache.remove(key).is_some())
            .unwrap_or(false);
        if removed {
            debug!(key = %key, "invalidated cached population");
        }
        removed
    }

    /// Clear all entries from the cache
    pub fn clear(&self) {
        if let Ok(mut cache) = self.data.write() {
            cache.clear();
        }
    }

    /// Keys currently cached, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<CacheKey> {
        let mut keys: Vec<CacheKey> = self
            .data
            .read()
            .map(|cache| cache.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Get the number of entries in the cache
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().map_or(0, |cache| cache.len())
    }

    /// Check if the cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for PopulationCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PopulationCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopulationCache")
            .field("keys", &self.keys())
            .finish()
    }
}

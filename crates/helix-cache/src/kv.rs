//! Key-Value store port with automatic serialization.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::{CacheError, FileStore};
use serde::{de::DeserializeOwned, Serialize};

/// A durable keyed byte store.
///
/// Implementations must tolerate being called from a single logical writer;
/// none of the storefront callers write concurrently.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store raw bytes under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List every key in the store.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Whether writes are actually retained.
    fn is_available(&self) -> bool {
        true
    }
}

/// Process-local store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CacheError {
    CacheError::StoreError("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Stand-in for an environment without durable storage.
///
/// Reads always miss and writes are dropped, so callers keep working on
/// their in-memory state only.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &[u8]) -> Result<(), CacheError> {
        tracing::trace!(key, "store unavailable, dropping write");
        Ok(())
    }

    fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }

    fn exists(&self, _key: &str) -> Result<bool, CacheError> {
        Ok(false)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(vec![])
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning shares the underlying store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("available", &self.store.is_available())
            .finish()
    }
}

impl Cache {
    /// Wrap an existing store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Open a fresh in-memory cache.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Open a cache whose writes are discarded.
    pub fn unavailable() -> Self {
        Self::new(UnavailableStore)
    }

    /// Open a file-backed cache rooted at `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_dir(".helix/store")?;
    /// ```
    pub fn open_dir(dir: impl Into<std::path::PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::new(FileStore::open(dir)?))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let profile: Option<Profile> = cache.get("personalization_data")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Whether writes through this cache are retained.
    pub fn is_available(&self) -> bool {
        self.store.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        count: u32,
    }

    #[test]
    fn test_memory_roundtrip() {
        let cache = Cache::in_memory();
        let entry = Entry {
            name: "cart".into(),
            count: 3,
        };

        cache.set("entry", &entry).unwrap();
        assert!(cache.exists("entry").unwrap());
        assert_eq!(cache.get::<Entry>("entry").unwrap(), Some(entry));
    }

    #[test]
    fn test_memory_missing_key() {
        let cache = Cache::in_memory();
        assert_eq!(cache.get::<Entry>("nope").unwrap(), None);
        assert!(!cache.exists("nope").unwrap());
    }

    #[test]
    fn test_memory_delete_and_keys() {
        let cache = Cache::in_memory();
        cache.set("b", &1).unwrap();
        cache.set("a", &2).unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);

        cache.delete("a").unwrap();
        cache.delete("a").unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_clone_shares_store() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set("shared", &"yes").unwrap();
        assert_eq!(other.get::<String>("shared").unwrap().as_deref(), Some("yes"));
    }

    #[test]
    fn test_corrupt_value_is_error() {
        let store = MemoryStore::new();
        store.set("bad", b"not json").unwrap();
        let cache = Cache::new(store);
        assert!(matches!(
            cache.get::<Entry>("bad"),
            Err(CacheError::SerializeError(_))
        ));
    }

    #[test]
    fn test_unavailable_store_drops_writes() {
        let cache = Cache::unavailable();
        assert!(!cache.is_available());

        cache.set("key", &42).unwrap();
        assert_eq!(cache.get::<i32>("key").unwrap(), None);
        assert!(cache.keys().unwrap().is_empty());
    }
}

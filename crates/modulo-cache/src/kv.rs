//! Typed wrapper over a key-value store with automatic serialization.

use crate::{CacheError, KeyValueStore};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a backend.
    ///
    /// # Example
    ///
    /// ```rust
    /// use modulo_cache::{Cache, MemoryStore};
    /// let cache = Cache::new(MemoryStore::new());
    /// cache.set("greeting", &"hola").unwrap();
    /// assert_eq!(cache.get::<String>("greeting").unwrap().as_deref(), Some("hola"));
    /// ```
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and
    /// [`CacheError::SerializeError`] if the stored bytes don't decode as `T`.
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
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
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

    /// Borrow the backend.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        qty: u32,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::new(MemoryStore::new());
        let rows = vec![Row { id: "a".into(), qty: 2 }];

        cache.set("rows", &rows).unwrap();
        let back: Option<Vec<Row>> = cache.get("rows").unwrap();

        assert_eq!(back, Some(rows));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::new(MemoryStore::new());
        let value: Option<Vec<Row>> = cache.get("absent").unwrap();
        assert!(value.is_none());
        assert!(!cache.exists("absent").unwrap());
    }

    #[test]
    fn test_corrupt_bytes_are_reported() {
        let store = MemoryStore::new();
        store.set("rows", b"{not json").unwrap();
        let cache = Cache::new(store);

        let err = cache.get::<Vec<Row>>("rows").unwrap_err();
        assert!(err.is_corrupt());
    }
}

//! The synchronous string key-value seam every repository is built on.
//!
//! Repositories never reach for a global store: they receive a backend
//! implementing [`KeyValueStore`] at construction. Production uses the LMDB
//! backend in [`local_db_state`](crate::local_db_state); tests and throwaway
//! sessions use [`MemoryStore`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use log::debug;

use crate::error::StoreError;

/// Minimal browser-storage-like interface: string keys, string values.
pub trait KeyValueStore {
    /// Returns the stored text for `key`, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing whatever was there.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Returns whether it existed.
    fn remove_item(&self, key: &str) -> Result<bool, StoreError>;

    /// Removes every key.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-process backend. Optionally enforces a byte quota over keys plus values,
/// mirroring the quota a browser applies to local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Number of stored keys; zero when the lock is poisoned.
    pub fn len(&self) -> usize {
        self.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.items
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("memory store lock poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.lock()?;

        if let Some(limit) = self.quota {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        debug!("memory store: set '{key}' ({} bytes)", value.len());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(key).is_some())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.lock()?.clear();
        Ok(())
    }
}

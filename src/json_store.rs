//! Typed JSON persistence over a [`KeyValueStore`].
//!
//! Reads never fail visibly: a missing key, empty text, a backend error or
//! malformed JSON all yield the caller's default. Writes are best effort: any
//! failure is logged and dropped.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::kv_store::KeyValueStore;

pub struct JsonStore<S> {
    backend: S,
}

impl<S: KeyValueStore> JsonStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Reads and decodes `key`, falling back to `default` on any failure.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let text = match self.backend.get_item(key) {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => {
                debug!("'{key}' is empty; using default");
                return default;
            }
            Err(e) => {
                warn!("Error reading '{key}' from storage: {e}");
                return default;
            }
        };

        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!("Error decoding '{key}' from storage: {e}");
                default
            }
        }
    }

    /// Encodes `value` and stores it under `key`. Failures are logged only.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                warn!("Error encoding '{key}' for storage: {e}");
                return;
            }
        };

        if let Err(e) = self.backend.set_item(key, &text) {
            warn!("Error saving '{key}' to storage: {e}");
        }
    }

    /// Removes `key`. Failures are logged only.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            warn!("Error removing '{key}' from storage: {e}");
        }
    }
}

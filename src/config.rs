//! Store configuration.
//!
//! [`StoreConfig`] is what a host hands to [`create_store`](crate::create_store) as
//! JSON. Every field has a default, so `{}` is a valid configuration and
//! `{"path": "/data/app/baghela"}` is the usual one.

use serde::{Deserialize, Serialize};

/// Default LMDB map size: 10 MiB, far above what the demo collections need.
pub const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;

pub const DEFAULT_PATH: &str = "baghela";
pub const DEFAULT_DB_NAME: &str = "baghela";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Base path of the store. The LMDB environment lives in `<path>.lmdb`.
    pub path: String,

    /// Upper bound of the memory map in bytes. Writes past it fail with
    /// `MapFull`, which is this store's "quota exceeded".
    pub map_size: usize,

    /// Name of the LMDB database holding the collection keys.
    pub db_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.to_string(),
            map_size: DEFAULT_MAP_SIZE,
            db_name: DEFAULT_DB_NAME.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn lmdb_dir(&self) -> String {
        format!("{}.lmdb", self.path)
    }
}

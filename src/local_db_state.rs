//! LMDB-backed [`KeyValueStore`].
//!
//! One LMDB environment per store, living in the directory `<path>.lmdb`, with a
//! single named database holding the five collection keys. Every write runs in
//! its own committed transaction; reads use short read-only transactions.

use std::fs;
use std::path::Path;

use lmdb::{Database, DatabaseFlags, Environment, Error as LmdbError, Transaction, WriteFlags};
use log::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::kv_store::KeyValueStore;

pub struct AppDbState {
    env: Option<Environment>,
    db: Database,
    config: StoreConfig,
}

impl AppDbState {
    /// Opens (or creates) the store described by `config`.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created or LMDB refuses to open the
    /// environment (bad path, permissions, map size below the existing data).
    pub fn init(config: StoreConfig) -> Result<Self, StoreError> {
        let dir = config.lmdb_dir();
        fs::create_dir_all(&dir)?;

        let env = Environment::new()
            .set_max_dbs(1)
            .set_map_size(config.map_size)
            .open(Path::new(&dir))?;

        let db = env.create_db(Some(config.db_name.as_str()), DatabaseFlags::empty())?;

        info!("LMDB store opened at {dir}");
        Ok(Self {
            env: Some(env),
            db,
            config,
        })
    }

    pub fn is_open(&self) -> bool {
        self.env.is_some()
    }

    /// Removes every key from the store while keeping it open.
    pub fn clear_all_records(&self) -> Result<(), StoreError> {
        let env = self.env()?;
        let mut txn = env.begin_rw_txn()?;
        txn.clear_db(self.db)?;
        txn.commit()?;
        info!("All records cleared from {}", self.config.lmdb_dir());
        Ok(())
    }

    /// Flushes and releases the environment. Every later operation fails with
    /// [`StoreError::Closed`]. Closing twice is a no-op.
    pub fn close_database(&mut self) -> Result<(), StoreError> {
        match self.env.take() {
            Some(env) => {
                if let Err(e) = env.sync(true) {
                    warn!("Failed to sync LMDB environment before closing: {e}");
                }
                drop(env);
                info!("LMDB store at {} closed", self.config.lmdb_dir());
            }
            None => debug!("close_database called on an already closed store"),
        }
        Ok(())
    }

    fn env(&self) -> Result<&Environment, StoreError> {
        self.env.as_ref().ok_or(StoreError::Closed)
    }
}

impl KeyValueStore for AppDbState {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let env = self.env()?;
        let txn = env.begin_ro_txn()?;

        let bytes = match txn.get(self.db, &key) {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(LmdbError::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        txn.abort();

        match bytes {
            Some(bytes) => Ok(Some(String::from_utf8(bytes)?)),
            None => Ok(None),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let env = self.env()?;
        let mut txn = env.begin_rw_txn()?;
        txn.put(self.db, &key, &value, WriteFlags::empty())?;
        txn.commit()?;

        debug!("LMDB store: set '{key}' ({} bytes)", value.len());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool, StoreError> {
        let env = self.env()?;
        let mut txn = env.begin_rw_txn()?;

        match txn.del(self.db, &key, None) {
            Ok(()) => {
                txn.commit()?;
                Ok(true)
            }
            Err(LmdbError::NotFound) => {
                txn.abort();
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.clear_all_records()
    }
}

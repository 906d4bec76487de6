//! In-memory key-value adapter.
//!
//! Implements both [`StoragePort`] and [`ConfigPort`].  Values live in a
//! `HashMap` keyed by `namespace::key`; nothing survives the process.  Used
//! by tests and by hosts that handle durability themselves.

use std::collections::HashMap;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StoragePort};
use crate::config::AppConfig;
use crate::persistence;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    store: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{namespace}::{key}")
    }

    /// Number of stored keys across all namespaces.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl StoragePort for MemoryStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        self.store
            .get(&Self::composite_key(namespace, key))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.store
            .insert(Self::composite_key(namespace, key), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store.remove(&Self::composite_key(namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store
            .contains_key(&Self::composite_key(namespace, key))
    }
}

impl ConfigPort for MemoryStore {
    fn load(&self) -> Result<AppConfig, ConfigError> {
        persistence::read_config(self)
    }

    fn save(&mut self, config: &AppConfig) -> Result<(), ConfigError> {
        persistence::write_config(self, config)?;
        info!("MemoryStore: config saved");
        Ok(())
    }
}

//! Directory-backed key-value adapter.
//!
//! Each value is one file at `<root>/<namespace>/<key>.json`.  Writes go to
//! a sibling `.tmp` file which is synced and then renamed over the target,
//! so a reader never sees a half-written record.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StoragePort};
use crate::config::AppConfig;
use crate::persistence;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at `root`.  The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        info!("FileStore: rooted at {}", root.display());
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, namespace: &str, key: &str) -> Result<PathBuf, StorageError> {
        let valid = |s: &str| {
            !s.is_empty()
                && s
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        };
        if !valid(namespace) || !valid(key) {
            warn!("FileStore: rejected key {namespace}::{key}");
            return Err(StorageError::IoError);
        }
        Ok(self.root.join(namespace).join(format!("{key}.json")))
    }
}

impl StoragePort for FileStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(namespace, key)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound,
            _ => {
                warn!("FileStore: read {} failed: {e}", path.display());
                StorageError::IoError
            }
        })
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(namespace, key)?;
        let io = |what: &str, e: std::io::Error| {
            warn!("FileStore: {what} {} failed: {e}", path.display());
            StorageError::IoError
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| io("mkdir for", e))?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let mut tmp = File::create(&tmp_path).map_err(|e| io("create temp for", e))?;
        tmp.write_all(data).map_err(|e| io("write temp for", e))?;
        tmp.sync_all().map_err(|e| io("sync temp for", e))?;
        drop(tmp);

        fs::rename(&tmp_path, &path).map_err(|e| io("rename into", e))
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(namespace, key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!("FileStore: delete {} failed: {e}", path.display());
                Err(StorageError::IoError)
            }
        }
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.path_for(namespace, key).is_ok_and(|p| p.is_file())
    }
}

impl ConfigPort for FileStore {
    fn load(&self) -> Result<AppConfig, ConfigError> {
        persistence::read_config(self)
    }

    fn save(&mut self, config: &AppConfig) -> Result<(), ConfigError> {
        persistence::write_config(self, config)?;
        info!("FileStore: config saved");
        Ok(())
    }
}

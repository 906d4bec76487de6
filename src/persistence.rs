//! Persisted records over any [`StoragePort`].
//!
//! Four JSON records live under the `petmatch` namespace:
//!
//! | key       | contents                          |
//! |-----------|-----------------------------------|
//! | `session` | signed-in [`Account`], if any     |
//! | `ratings` | every [`RatingFact`]              |
//! | `users`   | the [`StoredUser`] registry       |
//! | `config`  | [`AppConfig`] overrides           |
//!
//! Loading never fails: an absent record yields the default and a record
//! that does not decode is logged and replaced by the default.

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::app::ports::{ConfigError, StorageError, StoragePort};
use crate::config::{AppConfig, validate_config};
use crate::error::PersistError;
use crate::model::{Account, RatingFact, StoredUser};

pub const NAMESPACE: &str = "petmatch";

pub const SESSION_KEY: &str = "session";
pub const RATINGS_KEY: &str = "ratings";
pub const USERS_KEY: &str = "users";
pub const CONFIG_KEY: &str = "config";

/// Read and decode `key`.  `Ok(None)` when absent.
fn read_record<T: DeserializeOwned>(
    store: &impl StoragePort,
    key: &'static str,
) -> Result<Option<T>, PersistError> {
    let bytes = match store.read(NAMESPACE, key) {
        Ok(bytes) => bytes,
        Err(StorageError::NotFound) => return Ok(None),
        Err(StorageError::IoError) => return Err(PersistError::Storage("read failed")),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| PersistError::Corrupt {
            key,
            reason: e.to_string(),
        })
}

fn write_record<T: Serialize + ?Sized>(
    store: &mut impl StoragePort,
    key: &'static str,
    value: &T,
) -> Result<(), PersistError> {
    let bytes = serde_json::to_vec(value).map_err(|e| PersistError::Corrupt {
        key,
        reason: e.to_string(),
    })?;
    store
        .write(NAMESPACE, key, &bytes)
        .map_err(|_| PersistError::Storage("write failed"))?;
    debug!("persistence: wrote {key} ({} bytes)", bytes.len());
    Ok(())
}

/// Fail-soft load: absent or unreadable records become `T::default()`.
fn load_or_default<T: DeserializeOwned + Default>(store: &impl StoragePort, key: &'static str) -> T {
    match read_record(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!("persistence: {e}, using default");
            T::default()
        }
    }
}

// ── Session ───────────────────────────────────────────────────

pub fn load_session(store: &impl StoragePort) -> Option<Account> {
    load_or_default(store, SESSION_KEY)
}

/// Persist the signed-in account, or remove the record when `None`.
pub fn save_session(
    store: &mut impl StoragePort,
    account: Option<&Account>,
) -> Result<(), PersistError> {
    match account {
        Some(account) => write_record(store, SESSION_KEY, account),
        None => store
            .delete(NAMESPACE, SESSION_KEY)
            .map_err(|_| PersistError::Storage("delete failed")),
    }
}

// ── Ratings ───────────────────────────────────────────────────

pub fn load_ratings(store: &impl StoragePort) -> Vec<RatingFact> {
    load_or_default(store, RATINGS_KEY)
}

pub fn save_ratings(store: &mut impl StoragePort, facts: &[RatingFact]) -> Result<(), PersistError> {
    write_record(store, RATINGS_KEY, facts)
}

// ── Users ─────────────────────────────────────────────────────

pub fn load_users(store: &impl StoragePort) -> Vec<StoredUser> {
    load_or_default(store, USERS_KEY)
}

pub fn save_users(store: &mut impl StoragePort, users: &[StoredUser]) -> Result<(), PersistError> {
    write_record(store, USERS_KEY, users)
}

/// Remove the session record (logout) and leave the ratings record equal to
/// `remaining`.  An empty ledger deletes the ratings record outright.
pub fn clear_session(
    store: &mut impl StoragePort,
    remaining: &[RatingFact],
) -> Result<(), PersistError> {
    store
        .delete(NAMESPACE, SESSION_KEY)
        .map_err(|_| PersistError::Storage("delete failed"))?;
    if remaining.is_empty() {
        store
            .delete(NAMESPACE, RATINGS_KEY)
            .map_err(|_| PersistError::Storage("delete failed"))?;
        Ok(())
    } else {
        save_ratings(store, remaining)
    }
}

// ── Config ────────────────────────────────────────────────────
//
// Shared by every `ConfigPort` adapter that sits on a `StoragePort`.

/// Stored configuration, or defaults when none is stored.
pub fn read_config(store: &impl StoragePort) -> Result<AppConfig, ConfigError> {
    let config = match read_record::<AppConfig>(store, CONFIG_KEY) {
        Ok(Some(config)) => config,
        Ok(None) => return Ok(AppConfig::default()),
        Err(PersistError::Corrupt { .. }) => return Err(ConfigError::Corrupted),
        Err(PersistError::Storage(_)) => return Err(ConfigError::IoError),
    };
    validate_config(&config)?;
    Ok(config)
}

/// Validate, then persist.
pub fn write_config(store: &mut impl StoragePort, config: &AppConfig) -> Result<(), ConfigError> {
    validate_config(config)?;
    write_record(store, CONFIG_KEY, config).map_err(|e| match e {
        PersistError::Corrupt { .. } => ConfigError::Corrupted,
        PersistError::Storage(_) => ConfigError::IoError,
    })
}

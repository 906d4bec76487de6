//! Mock port adapters for integration tests.
//!
//! Records every emitted event and every storage call so tests can assert
//! on the full history without a real backend.

use petmatch::adapters::clock::ManualClock;
use petmatch::app::commands::Intent;
use petmatch::app::events::AppEvent;
use petmatch::app::ports::{ConfigError, ConfigPort, EventSink, StorageError, StoragePort};
use petmatch::app::service::AppService;
use petmatch::config::AppConfig;
use petmatch::persistence;
use petmatch::users::Registration;
use std::collections::HashMap;

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn last(&self) -> Option<&AppEvent> {
        self.events.last()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Storage call record ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Write(String),
    Delete(String),
}

// ── MockStore ─────────────────────────────────────────────────

/// Key-value store that logs writes and deletes and can be told to fail.
#[derive(Default)]
pub struct MockStore {
    data: HashMap<String, Vec<u8>>,
    pub calls: Vec<StoreCall>,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw record under the app namespace.
    pub fn put(&mut self, key: &str, bytes: &[u8]) {
        self.data
            .insert(format!("{}::{key}", persistence::NAMESPACE), bytes.to_vec());
    }

    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.data
            .get(&format!("{}::{key}", persistence::NAMESPACE))
            .map(Vec::as_slice)
    }

    pub fn writes_to(&self, key: &str) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, StoreCall::Write(k) if k == key))
            .count()
    }
}

impl StoragePort for MockStore {
    fn read(&self, ns: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        self.data
            .get(&format!("{ns}::{key}"))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    fn write(&mut self, ns: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.calls.push(StoreCall::Write(key.to_owned()));
        if self.fail_writes {
            return Err(StorageError::IoError);
        }
        self.data.insert(format!("{ns}::{key}"), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, ns: &str, key: &str) -> Result<(), StorageError> {
        self.calls.push(StoreCall::Delete(key.to_owned()));
        self.data.remove(&format!("{ns}::{key}"));
        Ok(())
    }

    fn exists(&self, ns: &str, key: &str) -> bool {
        self.data.contains_key(&format!("{ns}::{key}"))
    }
}

impl ConfigPort for MockStore {
    fn load(&self) -> Result<AppConfig, ConfigError> {
        persistence::read_config(self)
    }

    fn save(&mut self, config: &AppConfig) -> Result<(), ConfigError> {
        persistence::write_config(self, config)
    }
}

// ── Harness ───────────────────────────────────────────────────

/// Service plus mock ports, wired together.
pub struct Harness {
    pub app: AppService,
    pub store: MockStore,
    pub clock: ManualClock,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        Self::with_store(MockStore::new())
    }

    /// Fresh service restored from `store`.
    pub fn with_store(store: MockStore) -> Self {
        let mut h = Self {
            app: AppService::new(AppConfig::default()),
            store,
            clock: ManualClock::default(),
            sink: RecordingSink::new(),
        };
        h.app.restore(&h.store, &mut h.sink);
        h
    }

    pub fn send(&mut self, intent: Intent) -> petmatch::Result<()> {
        self.app
            .handle_intent(intent, &mut self.store, &self.clock, &mut self.sink)
    }

    /// Let simulated latency elapse and resolve any pending authentication.
    pub fn settle_auth(&mut self) -> petmatch::Result<bool> {
        self.clock.advance_ms(5_000);
        self.app
            .poll_pending_auth(&mut self.store, &self.clock, &mut self.sink)
    }

    pub fn registration(email: &str) -> Registration {
        Registration {
            name: "Alex".into(),
            email: email.into(),
            password: "hunter22".into(),
            ..Default::default()
        }
    }

    /// Register `email` and wait until signed in.
    pub fn sign_up(&mut self, email: &str) {
        self.send(Intent::Register(Self::registration(email)))
            .expect("register accepted");
        assert!(self.settle_auth().expect("register resolves"));
    }

    /// Restart: a new service restored from the same store.
    pub fn restart(self) -> Self {
        Self::with_store(self.store)
    }
}

use std::collections::HashMap;
use thiserror::Error;

/// Failure of the session-scoped key-value store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store is disabled or missing (private mode, browser policy, ...).
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
    #[error("session storage rejected write of {key}: {reason}")]
    WriteRejected { key: String, reason: String },
}

/// Session-scoped key-value store holding the "intro already played" flag.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for headless runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `key = value`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

const PLAYED: &str = "true";

/// Whether the intro already played this session. Store failures read as "not played".
pub fn intro_played(store: &dyn SessionStore, key: &str) -> bool {
    match store.get(key) {
        Ok(value) => value.as_deref() == Some(PLAYED),
        Err(err) => {
            log::warn!("session flag unreadable, replaying intro: {err}");
            false
        }
    }
}

/// Record that the intro played. Store failures are logged and dropped.
pub fn mark_intro_played(store: &mut dyn SessionStore, key: &str) {
    if let Err(err) = store.set(key, PLAYED) {
        log::warn!("session flag not saved: {err}");
    }
}

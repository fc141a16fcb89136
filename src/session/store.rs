//! Session store adapter over a key-value backend.

use super::{SessionRecord, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Well-known key holding the session record.
pub const SESSION_KEY: &str = "hanoiStatus";

/// A string key-value backend.
///
/// The session adapter only ever touches [`SESSION_KEY`], but backends are
/// general so tests can seed arbitrary raw values.
pub trait KeyValueStore {
    /// Reads the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrites the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory backend. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKv {
    /// Creates an empty in-memory store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryKv {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    #[instrument(skip(self, value))]
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the one session record held by a backend.
#[derive(Debug, Clone)]
pub struct SessionStore<K> {
    backend: K,
}

impl<K: KeyValueStore> SessionStore<K> {
    /// Wraps a key-value backend.
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    /// Loads the record, surfacing malformed or unreadable state as an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the value does not parse.
    #[instrument(skip(self))]
    pub fn try_load(&self) -> Result<Option<SessionRecord>, StoreError> {
        let Some(raw) = self.backend.get(SESSION_KEY)? else {
            debug!("No session record stored");
            return Ok(None);
        };
        let record = serde_json::from_str::<SessionRecord>(&raw)?;
        debug!(status = ?record.status(), moves = record.moves(), "Session record loaded");
        Ok(Some(record))
    }

    /// Loads the record, treating anything unreadable as absent.
    #[instrument(skip(self))]
    pub fn load(&self) -> Option<SessionRecord> {
        match self.try_load() {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session record");
                None
            }
        }
    }

    /// Overwrites the stored record. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the backend write fails.
    #[instrument(skip(self, record), fields(status = ?record.status(), moves = record.moves()))]
    pub fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let raw = serde_json::to_string(record)?;
        self.backend.set(SESSION_KEY, &raw)?;
        info!("Session record saved");
        Ok(())
    }
}

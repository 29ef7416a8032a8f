//! History Store
//!
//! Bounded, most-recent-first log of draws. Every mutation updates memory
//! first and then writes the whole sequence through the key-value store.
//! Write failures are logged and swallowed; memory stays authoritative.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::draw::DrawResult;
use crate::history::item::HistoryItem;
use crate::storage::{KeyValueStore, StoreError};
use crate::{HISTORY_CAPACITY, HISTORY_STORAGE_KEY};

/// Errors reading or writing the persisted history.
///
/// Never returned from the public API; kept for logging.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The backing store failed.
    #[error("history store failed: {0}")]
    Store(#[from] StoreError),

    /// The blob is not a valid history array.
    #[error("history blob is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Bounded history of draws.
pub struct HistoryStore {
    store: Box<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    items: Vec<HistoryItem>,
    persist_failed: bool,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("key", &self.key)
            .field("capacity", &self.capacity)
            .field("len", &self.items.len())
            .field("persist_failed", &self.persist_failed)
            .finish()
    }
}

impl HistoryStore {
    /// Create an empty store with the default key and capacity.
    ///
    /// Nothing is read until [`HistoryStore::load`] is called.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            key: HISTORY_STORAGE_KEY.to_string(),
            capacity: HISTORY_CAPACITY,
            items: Vec::new(),
            persist_failed: false,
        }
    }

    /// Create a store and load whatever is persisted.
    pub fn open(store: impl KeyValueStore + 'static) -> Self {
        let mut history = Self::new(store);
        history.load();
        history
    }

    /// Use a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Use a smaller capacity. Clamped to `1..=HISTORY_CAPACITY`.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.clamp(1, HISTORY_CAPACITY);
        self.items.truncate(self.capacity);
        self
    }

    /// Storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries, most recent first.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether the most recent write failed.
    ///
    /// Cleared by the next successful write.
    pub fn persistence_degraded(&self) -> bool {
        self.persist_failed
    }

    /// Replace the in-memory history with the persisted one.
    ///
    /// A missing key yields an empty history. A read or parse failure is
    /// logged and also yields an empty history.
    pub fn load(&mut self) -> &[HistoryItem] {
        self.items = match self.read_persisted() {
            Ok(items) => self.sanitize(items),
            Err(e) => {
                warn!("Discarding stored history under {:?}: {}", self.key, e);
                Vec::new()
            }
        };
        debug!("Loaded {} history entries", self.items.len());
        &self.items
    }

    /// Record a draw as the newest entry.
    ///
    /// Evicts the oldest entries beyond capacity, then persists.
    pub fn record(&mut self, result: DrawResult) -> HistoryItem {
        let item = HistoryItem::new(self.fresh_id(), result);
        self.items.insert(0, item.clone());
        if self.items.len() > self.capacity {
            let evicted = self.items.len() - self.capacity;
            self.items.truncate(self.capacity);
            debug!("Evicted {} oldest history entries", evicted);
        }
        self.persist();
        item
    }

    /// Remove the entry with `id`. Returns whether one was removed.
    ///
    /// An unknown id leaves the history unchanged; it is persisted either way.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if !removed {
            debug!("History entry {} not found", id);
        }
        self.persist();
        removed
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    fn read_persisted(&self) -> Result<Vec<HistoryItem>, HistoryError> {
        match self.store.get(&self.key)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    /// Enforce capacity and id uniqueness on data that came from outside.
    fn sanitize(&self, mut items: Vec<HistoryItem>) -> Vec<HistoryItem> {
        let mut seen = BTreeSet::new();
        let before = items.len();
        items.retain(|item| seen.insert(item.id.clone()));
        items.truncate(self.capacity);
        if items.len() != before {
            warn!("Dropped {} stored history entries (duplicates or over capacity)", before - items.len());
        }
        items
    }

    fn persist(&mut self) {
        let outcome = serde_json::to_string(&self.items)
            .map_err(HistoryError::from)
            .and_then(|blob| self.store.set(&self.key, &blob).map_err(HistoryError::from));

        match outcome {
            Ok(()) => self.persist_failed = false,
            Err(e) => {
                warn!("Failed to persist history under {:?}: {}", self.key, e);
                self.persist_failed = true;
            }
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().simple().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

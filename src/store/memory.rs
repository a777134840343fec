//! Memory Store Module
//!
//! In-process transient store: a HashMap of entries with TTL expiration.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use super::{StoreStats, TransientEntry, TransientStore, Value};
use crate::cache::MAX_PHYSICAL_KEY_LENGTH;

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, TransientEntry>,
    stats: StoreStats,
}

impl Inner {
    /// Looks up a live entry, dropping it first if it has expired.
    fn live(&mut self, key: &str) -> Option<&TransientEntry> {
        if self.entries.get(key).is_some_and(TransientEntry::is_expired) {
            self.entries.remove(key);
        }
        self.entries.get(key)
    }
}

// == Memory Store ==
/// Thread-safe in-memory [`TransientStore`].
///
/// Expired entries are treated as absent on access and physically removed by
/// [`MemoryStore::purge_expired`].
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    /// Longest physical key accepted by `set`
    max_key_length: usize,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store with the default key-length ceiling.
    pub fn new() -> Self {
        Self::with_max_key_length(MAX_PHYSICAL_KEY_LENGTH)
    }

    /// Creates an empty store that accepts physical keys up to `max_key_length` bytes.
    pub fn with_max_key_length(max_key_length: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_key_length,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> StoreStats {
        let inner = self.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - inner.entries.len();
        let remaining = inner.entries.len();
        inner.stats.set_total_entries(remaining);
        removed
    }

    /// Seconds left before `key` expires. `None` when absent or when it never expires.
    pub fn ttl_remaining(&self, key: &str) -> Option<u64> {
        self.lock().live(key).and_then(TransientEntry::ttl_remaining)
    }

    /// Returns the number of entries held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransientStore for MemoryStore {
    fn max_key_length(&self) -> usize {
        self.max_key_length
    }

    fn get(&self, key: &str) -> Option<Value> {
        let mut inner = self.lock();
        let value = inner.live(key).map(|entry| entry.value.clone());
        if value.is_some() {
            inner.stats.record_hit();
        } else {
            inner.stats.record_miss();
        }
        value
    }

    fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> bool {
        if key.len() > self.max_key_length {
            warn!(
                key,
                max_key_length = self.max_key_length,
                "Rejecting transient with over-long key"
            );
            return false;
        }

        let mut inner = self.lock();
        inner
            .entries
            .insert(key.to_string(), TransientEntry::new(value, ttl_seconds));
        let count = inner.entries.len();
        inner.stats.set_total_entries(count);
        true
    }

    fn delete(&self, key: &str) -> bool {
        let mut inner = self.lock();
        // An expired entry counts as already gone
        let removed = inner
            .entries
            .remove(key)
            .is_some_and(|entry| !entry.is_expired());
        let count = inner.entries.len();
        inner.stats.set_total_entries(count);
        removed
    }

    fn exists(&self, key: &str) -> bool {
        self.lock().live(key).is_some()
    }

    fn clear_prefix(&self, prefix: &str) -> bool {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.starts_with(prefix));
        let count = inner.entries.len();
        inner.stats.set_total_entries(count);
        debug!(prefix, removed = before - count, "Cleared transients by prefix");
        true
    }
}

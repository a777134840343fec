//! Store Module
//!
//! The transient store the cache facade delegates to, plus an in-memory adapter.
//!
//! A store only knows physical keys. Namespacing and key validation happen
//! one layer up, in [`crate::cache::TransientCache`].

mod entry;
mod memory;
mod stats;

pub use entry::TransientEntry;
pub use memory::MemoryStore;
pub use stats::StoreStats;

use crate::cache::MAX_PHYSICAL_KEY_LENGTH;

/// Value type held by a transient store.
pub type Value = serde_json::Value;

// == Transient Store ==
/// Single-item primitives of an ephemeral key-value store with expiration.
///
/// Implementations must be safe to share between threads; the facade adds no
/// locking of its own.
pub trait TransientStore: Send + Sync {
    /// Longest physical key this store accepts.
    fn max_key_length(&self) -> usize {
        MAX_PHYSICAL_KEY_LENGTH
    }

    /// Returns the live value for `key`, or `None` on a miss.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key` for `ttl_seconds` (`0` = no expiration).
    fn set(&self, key: &str, value: Value, ttl_seconds: u64) -> bool;

    /// Removes `key`. Returns `false` when nothing was removed.
    fn delete(&self, key: &str) -> bool;

    /// True iff a live entry exists for `key`.
    fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Stores that cannot enumerate their keys keep this default and report failure.
    fn clear_prefix(&self, _prefix: &str) -> bool {
        false
    }
}

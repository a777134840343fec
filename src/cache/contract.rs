//! Simple Cache Contract
//!
//! The complete cache interface. Implementors provide the single-item
//! operations; bulk operations are composed from them.

use std::collections::HashMap;

use crate::error::Result;
use crate::store::Value;

// == Simple Cache ==
/// Key/value cache contract with single-item and bulk operations.
///
/// Every key-taking operation returns `Err` only for an invalid key. Store
/// failures are reported through the `bool` results instead.
///
/// None of these operations are atomic with respect to each other: a `has`
/// result can be stale by the time the caller acts on it, and bulk writes are
/// not transactional.
pub trait SimpleCache {
    /// Validates a logical key without touching the store.
    fn validate_key(&self, key: &str) -> Result<()>;

    /// Fetches a value, or `None` on a miss.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Persists a value. `ttl` falls back to the cache's default TTL.
    fn set(&self, key: &str, value: Value, ttl: Option<u64>) -> Result<bool>;

    /// Removes a value. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<bool>;

    /// True iff a live entry exists for `key`.
    fn has(&self, key: &str) -> Result<bool>;

    /// Wipes every entry belonging to this cache.
    fn clear(&self) -> bool;

    /// Fetches a value, falling back to `default` on a miss.
    fn get_or(&self, key: &str, default: Value) -> Result<Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    // == Get Multiple ==
    /// Fetches several values, keyed by logical key.
    ///
    /// Missing keys map to `default`. The first invalid key fails the whole call.
    fn get_multiple<I, K>(&self, keys: I, default: Value) -> Result<HashMap<String, Value>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut values = HashMap::new();
        for key in keys {
            let key = key.as_ref();
            let value = self.get_or(key, default.clone())?;
            values.insert(key.to_string(), value);
        }
        Ok(values)
    }

    // == Set Multiple ==
    /// Persists several values with a shared TTL.
    ///
    /// All keys are validated before the first write. Every pair is then
    /// attempted; the result is `true` only if every write succeeded.
    fn set_multiple<I, K>(&self, values: I, ttl: Option<u64>) -> Result<bool>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let values: Vec<(K, Value)> = values.into_iter().collect();
        for (key, _) in &values {
            self.validate_key(key.as_ref())?;
        }

        let mut all_set = true;
        for (key, value) in values {
            all_set &= self.set(key.as_ref(), value, ttl)?;
        }
        Ok(all_set)
    }

    // == Delete Multiple ==
    /// Removes several values.
    ///
    /// Same policy as [`SimpleCache::set_multiple`]: validate all, attempt all,
    /// report `true` only if every delete succeeded.
    fn delete_multiple<I, K>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        for key in &keys {
            self.validate_key(key.as_ref())?;
        }

        let mut all_deleted = true;
        for key in &keys {
            all_deleted &= self.delete(key.as_ref())?;
        }
        Ok(all_deleted)
    }
}

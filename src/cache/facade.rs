//! Transient Cache Facade
//!
//! Namespaced [`SimpleCache`] over a shared [`TransientStore`].

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{KeyPolicy, SimpleCache, DEFAULT_TTL};
use crate::error::Result;
use crate::store::{TransientStore, Value};

// == Transient Cache ==
/// One logical cache namespace on a (possibly shared) transient store.
///
/// Holds only immutable configuration, so a single instance can be shared
/// between any number of callers. Entries and their expiry live entirely in
/// the store.
pub struct TransientCache<S: ?Sized> {
    store: Arc<S>,
    policy: KeyPolicy,
    default_ttl: u64,
}

impl<S: TransientStore + ?Sized> TransientCache<S> {
    // == Constructor ==
    /// Creates a cache for `namespace` on `store` with the default TTL of 3600s.
    ///
    /// Fails when the namespace is empty or longer than the store's key ceiling.
    pub fn new(store: Arc<S>, namespace: impl Into<String>) -> Result<Self> {
        let policy = KeyPolicy::new(namespace, store.max_key_length())?;
        Ok(Self {
            store,
            policy,
            default_ttl: DEFAULT_TTL,
        })
    }

    /// Replaces the TTL used when `set` is called without one.
    pub fn with_default_ttl(mut self, default_ttl: u64) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    pub fn namespace(&self) -> &str {
        self.policy.namespace()
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Longest logical key this namespace accepts, in bytes.
    pub fn allowed_key_length(&self) -> usize {
        self.policy.allowed_key_length()
    }

    pub fn key_policy(&self) -> &KeyPolicy {
        &self.policy
    }
}

impl<S: TransientStore + ?Sized> SimpleCache for TransientCache<S> {
    fn validate_key(&self, key: &str) -> Result<()> {
        self.policy.validate(key)
    }

    fn get(&self, key: &str) -> Result<Option<Value>> {
        let physical = self.policy.to_physical_key(key)?;
        let value = self.store.get(&physical);
        debug!(key = %physical, hit = value.is_some(), "cache get");
        Ok(value)
    }

    fn set(&self, key: &str, value: Value, ttl: Option<u64>) -> Result<bool> {
        let physical = self.policy.to_physical_key(key)?;
        let ttl = ttl.unwrap_or(self.default_ttl);

        let stored = self.store.set(&physical, value, ttl);
        if stored {
            debug!(key = %physical, ttl, "cache set");
        } else {
            warn!(key = %physical, ttl, "Transient store failed to set entry");
        }
        Ok(stored)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let physical = self.policy.to_physical_key(key)?;
        let deleted = self.store.delete(&physical);
        debug!(key = %physical, deleted, "cache delete");
        Ok(deleted)
    }

    fn has(&self, key: &str) -> Result<bool> {
        let physical = self.policy.to_physical_key(key)?;
        Ok(self.store.exists(&physical))
    }

    fn clear(&self) -> bool {
        let cleared = self.store.clear_prefix(self.policy.prefix());
        if cleared {
            debug!(namespace = self.namespace(), "cache cleared");
        } else {
            warn!(
                namespace = self.namespace(),
                "Transient store could not clear namespace"
            );
        }
        cleared
    }
}

impl<S: ?Sized> Clone for TransientCache<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            policy: self.policy.clone(),
            default_ttl: self.default_ttl,
        }
    }
}

impl<S: ?Sized> fmt::Debug for TransientCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransientCache")
            .field("namespace", &self.policy.namespace())
            .field("allowed_key_length", &self.policy.allowed_key_length())
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

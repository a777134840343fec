//! Key Policy Module
//!
//! Validates logical keys and maps them onto namespaced physical keys.

use super::KEY_SEPARATOR;
use crate::error::{CacheError, Result};

// == Key Policy ==
/// Key validation and namespacing rules for one cache namespace.
///
/// The length budget for logical keys is fixed at construction:
/// `max_physical_key_length - len(namespace) - len(separator)`, so every
/// physical key produced fits the store's ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPolicy {
    namespace: String,
    prefix: String,
    allowed_key_length: usize,
}

impl KeyPolicy {
    // == Constructor ==
    /// Creates the policy for `namespace` on a store with the given ceiling.
    ///
    /// The namespace itself must be non-empty, no longer than the ceiling and
    /// free of the separator, so no namespace prefix can cover another
    /// namespace's keys.
    pub fn new(namespace: impl Into<String>, max_physical_key_length: usize) -> Result<Self> {
        let namespace = namespace.into();
        check_key(&namespace, max_physical_key_length)?;
        if namespace.contains(KEY_SEPARATOR) {
            return Err(CacheError::InvalidKey(namespace));
        }

        let allowed_key_length = max_physical_key_length
            .saturating_sub(namespace.len())
            .saturating_sub(KEY_SEPARATOR.len_utf8());
        let prefix = format!("{namespace}{KEY_SEPARATOR}");

        Ok(Self {
            namespace,
            prefix,
            allowed_key_length,
        })
    }

    // == Validate ==
    /// Checks that `key` is non-empty and fits the namespace's length budget.
    pub fn validate(&self, key: &str) -> Result<()> {
        check_key(key, self.allowed_key_length)
    }

    // == Physical Key ==
    /// Validates `key` and returns `namespace + "_" + key`.
    pub fn to_physical_key(&self, key: &str) -> Result<String> {
        self.validate(key)?;
        Ok(format!("{}{}", self.prefix, key))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Prefix shared by every physical key of this namespace.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn allowed_key_length(&self) -> usize {
        self.allowed_key_length
    }
}

fn check_key(key: &str, limit: usize) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey(key.to_string()));
    }

    if key.len() > limit {
        return Err(CacheError::KeyTooLong {
            key: key.to_string(),
            len: key.len(),
            allowed: limit,
        });
    }

    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MAX_PHYSICAL_KEY_LENGTH;

    #[test]
    fn test_allowed_key_length_accounts_for_namespace_and_separator() {
        let policy = KeyPolicy::new("users", MAX_PHYSICAL_KEY_LENGTH).unwrap();
        assert_eq!(policy.allowed_key_length(), MAX_PHYSICAL_KEY_LENGTH - 5 - 1);
        assert_eq!(policy.namespace(), "users");
        assert_eq!(policy.prefix(), "users_");
    }

    #[test]
    fn test_empty_key_is_invalid() {
        let policy = KeyPolicy::new("ns", MAX_PHYSICAL_KEY_LENGTH).unwrap();
        let err = policy.validate("").unwrap_err();
        assert_eq!(err, CacheError::InvalidKey(String::new()));
    }

    #[test]
    fn test_key_at_budget_is_accepted() {
        let policy = KeyPolicy::new("ns", MAX_PHYSICAL_KEY_LENGTH).unwrap();
        let key = "k".repeat(policy.allowed_key_length());

        let physical = policy.to_physical_key(&key).unwrap();
        assert_eq!(physical.len(), MAX_PHYSICAL_KEY_LENGTH);
    }

    #[test]
    fn test_key_over_budget_is_too_long() {
        let policy = KeyPolicy::new("ns", MAX_PHYSICAL_KEY_LENGTH).unwrap();
        let key = "k".repeat(policy.allowed_key_length() + 1);

        let err = policy.validate(&key).unwrap_err();
        assert!(matches!(err, CacheError::KeyTooLong { len, allowed, .. }
            if len == allowed + 1 && allowed == policy.allowed_key_length()));
        assert!(err.is_invalid_key());
    }

    #[test]
    fn test_to_physical_key() {
        let policy = KeyPolicy::new("sessions", MAX_PHYSICAL_KEY_LENGTH).unwrap();
        assert_eq!(policy.to_physical_key("abc").unwrap(), "sessions_abc");
    }

    #[test]
    fn test_empty_namespace_rejected() {
        let err = KeyPolicy::new("", MAX_PHYSICAL_KEY_LENGTH).unwrap_err();
        assert!(matches!(err, CacheError::InvalidKey(_)));
    }

    #[test]
    fn test_namespace_with_separator_rejected() {
        for namespace in ["a_b", "_a", "a_"] {
            let err = KeyPolicy::new(namespace, MAX_PHYSICAL_KEY_LENGTH).unwrap_err();
            assert_eq!(err, CacheError::InvalidKey(namespace.to_string()));
        }
    }

    #[test]
    fn test_logical_keys_may_contain_separator() {
        let policy = KeyPolicy::new("a", MAX_PHYSICAL_KEY_LENGTH).unwrap();
        assert_eq!(policy.to_physical_key("b_x").unwrap(), "a_b_x");
    }

    #[test]
    fn test_namespace_checked_against_full_ceiling() {
        let at_ceiling = "n".repeat(MAX_PHYSICAL_KEY_LENGTH);
        let policy = KeyPolicy::new(at_ceiling, MAX_PHYSICAL_KEY_LENGTH).unwrap();
        // Nothing left for logical keys
        assert_eq!(policy.allowed_key_length(), 0);
        assert!(matches!(
            policy.validate("a"),
            Err(CacheError::KeyTooLong { .. })
        ));

        let over = "n".repeat(MAX_PHYSICAL_KEY_LENGTH + 1);
        assert!(matches!(
            KeyPolicy::new(over, MAX_PHYSICAL_KEY_LENGTH),
            Err(CacheError::KeyTooLong { .. })
        ));
    }

    #[test]
    fn test_length_is_measured_in_bytes() {
        let policy = KeyPolicy::new("ns", 7).unwrap();
        assert_eq!(policy.allowed_key_length(), 4);

        assert!(policy.validate("abcd").is_ok());
        // Three characters, seven bytes
        assert!(policy.validate("éé€").is_err());
    }
}

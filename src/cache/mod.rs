//! Cache Module
//!
//! Namespaced cache contract layered over a [`TransientStore`](crate::store::TransientStore).

mod contract;
mod facade;
mod key_policy;


// Re-export public types
pub use contract::SimpleCache;
pub use facade::TransientCache;
pub use key_policy::KeyPolicy;

// == Public Constants ==
/// Default key-length ceiling of a transient store, in bytes
pub const MAX_PHYSICAL_KEY_LENGTH: usize = 172;

/// TTL in seconds applied when neither the facade nor the call provides one
pub const DEFAULT_TTL: u64 = 3600;

/// Joins namespace and logical key into a physical key
pub const KEY_SEPARATOR: char = '_';

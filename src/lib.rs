//! Transient Cache - a namespaced, TTL-bound cache facade
//!
//! Turns the single-item primitives of a transient key-value store into a
//! complete cache contract, with key validation and namespace isolation on a
//! shared store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{KeyPolicy, SimpleCache, TransientCache};
pub use config::Config;
pub use error::{CacheError, ErrorKind};
pub use store::{MemoryStore, TransientStore};
pub use tasks::spawn_cleanup_task;

//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies. Keys are validated
//! by the cache itself, not here.

use std::collections::HashMap;

use serde::Deserialize;

use crate::store::Value;

/// Request body for PUT /cache/:namespace/:key
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The value to store
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Request body for POST /batch/:namespace/get
#[derive(Debug, Clone, Deserialize)]
pub struct GetMultipleRequest {
    pub keys: Vec<String>,
    /// Value reported for missing keys (null when omitted)
    #[serde(default)]
    pub default: Value,
}

/// Request body for PUT /batch/:namespace
#[derive(Debug, Clone, Deserialize)]
pub struct SetMultipleRequest {
    pub values: HashMap<String, Value>,
    /// Optional TTL in seconds, shared by every value
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Request body for POST /batch/:namespace/delete
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteMultipleRequest {
    pub keys: Vec<String>,
}

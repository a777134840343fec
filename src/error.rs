//! Error types for the transient cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

// == Error Kind ==
/// Discriminator for [`CacheError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidKey,
    KeyTooLong,
    Operation,
    NotFound,
}

// == Cache Error Enum ==
/// Unified error type for the transient cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key (or namespace) is empty or otherwise not a legal identifier
    #[error("Invalid key for cache: {0:?}")]
    InvalidKey(String),

    /// Key would push the physical key past the store's ceiling
    #[error("Key too long for transient store: {len} bytes, at most {allowed} allowed")]
    KeyTooLong {
        key: String,
        len: usize,
        allowed: usize,
    },

    /// The underlying store reported a failure
    #[error("Cache operation failed: {0}")]
    Operation(String),

    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),
}

impl CacheError {
    /// Returns the kind discriminator for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CacheError::InvalidKey(_) => ErrorKind::InvalidKey,
            CacheError::KeyTooLong { .. } => ErrorKind::KeyTooLong,
            CacheError::Operation(_) => ErrorKind::Operation,
            CacheError::NotFound(_) => ErrorKind::NotFound,
        }
    }

    /// True for every key validation failure, including `KeyTooLong`.
    pub fn is_invalid_key(&self) -> bool {
        matches!(
            self,
            CacheError::InvalidKey(_) | CacheError::KeyTooLong { .. }
        )
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidKey(_) | CacheError::KeyTooLong { .. } => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Operation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the transient cache.
pub type Result<T> = std::result::Result<T, CacheError>;

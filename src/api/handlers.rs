//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Every handler builds a
//! [`TransientCache`] for the namespace in the path, on the shared store.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{SimpleCache, TransientCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    BatchResponse, ClearResponse, DeleteMultipleRequest, DeleteResponse, ExistsResponse,
    GetMultipleRequest, GetMultipleResponse, GetResponse, HealthResponse, SetMultipleRequest,
    SetRequest, SetResponse, StatsResponse,
};
use crate::store::MemoryStore;

/// Application state shared across all handlers.
///
/// One physical store backs every namespace.
#[derive(Clone)]
pub struct AppState {
    /// Shared transient store
    pub store: Arc<MemoryStore>,
    /// TTL applied when a request does not carry one
    pub default_ttl: u64,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: MemoryStore, default_ttl: u64) -> Self {
        Self {
            store: Arc::new(store),
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let store = MemoryStore::with_max_key_length(config.max_key_length);
        Self::new(store, config.default_ttl)
    }

    /// Opens the cache for `namespace` on the shared store.
    pub fn cache(&self, namespace: &str) -> Result<TransientCache<MemoryStore>> {
        Ok(TransientCache::new(Arc::clone(&self.store), namespace)?
            .with_default_ttl(self.default_ttl))
    }
}

/// Handler for PUT /cache/:namespace/:key
pub async fn set_handler(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    let cache = state.cache(&namespace)?;

    if !cache.set(&key, req.value, req.ttl)? {
        return Err(CacheError::Operation(format!("failed to set '{}'", key)));
    }

    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /cache/:namespace/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    let cache = state.cache(&namespace)?;

    match cache.get(&key)? {
        Some(value) => Ok(Json(GetResponse::new(namespace, key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /cache/:namespace/:key/exists
pub async fn exists_handler(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<Json<ExistsResponse>> {
    let exists = state.cache(&namespace)?.has(&key)?;
    Ok(Json(ExistsResponse::new(key, exists)))
}

/// Handler for DELETE /cache/:namespace/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.cache(&namespace)?.delete(&key)?;
    Ok(Json(DeleteResponse::new(key, deleted)))
}

/// Handler for DELETE /cache/:namespace
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Result<Json<ClearResponse>> {
    if !state.cache(&namespace)?.clear() {
        return Err(CacheError::Operation(format!(
            "failed to clear namespace '{}'",
            namespace
        )));
    }

    Ok(Json(ClearResponse::new(namespace)))
}

/// Handler for POST /batch/:namespace/get
pub async fn get_multiple_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Json(req): Json<GetMultipleRequest>,
) -> Result<Json<GetMultipleResponse>> {
    let values = state
        .cache(&namespace)?
        .get_multiple(&req.keys, req.default)?;
    Ok(Json(GetMultipleResponse { values }))
}

/// Handler for PUT /batch/:namespace
pub async fn set_multiple_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Json(req): Json<SetMultipleRequest>,
) -> Result<Json<BatchResponse>> {
    let count = req.values.len();
    let success = state
        .cache(&namespace)?
        .set_multiple(req.values, req.ttl)?;
    Ok(Json(BatchResponse { success, count }))
}

/// Handler for POST /batch/:namespace/delete
pub async fn delete_multiple_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Json(req): Json<DeleteMultipleRequest>,
) -> Result<Json<BatchResponse>> {
    let count = req.keys.len();
    let success = state.cache(&namespace)?.delete_multiple(&req.keys)?;
    Ok(Json(BatchResponse { success, count }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.store.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DEFAULT_TTL;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::new(MemoryStore::new(), DEFAULT_TTL)
    }

    fn path(namespace: &str, key: &str) -> Path<(String, String)> {
        Path((namespace.to_string(), key.to_string()))
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let req = SetRequest {
            value: json!("test_value"),
            ttl: None,
        };
        let result = set_handler(State(state.clone()), path("ns", "test_key"), Json(req)).await;
        assert!(result.is_ok());

        let response = get_handler(State(state), path("ns", "test_key"))
            .await
            .unwrap();
        assert_eq!(response.value, json!("test_value"));
        assert_eq!(response.namespace, "ns");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_handler(State(test_state()), path("ns", "nonexistent")).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();
        state.cache("ns").unwrap().set("to_delete", json!(1), None).unwrap();

        let response = delete_handler(State(state.clone()), path("ns", "to_delete"))
            .await
            .unwrap();
        assert!(response.deleted);

        let response = delete_handler(State(state), path("ns", "to_delete"))
            .await
            .unwrap();
        assert!(!response.deleted);
    }

    #[tokio::test]
    async fn test_exists_handler() {
        let state = test_state();
        state.cache("ns").unwrap().set("k", json!(null), None).unwrap();

        let response = exists_handler(State(state.clone()), path("ns", "k"))
            .await
            .unwrap();
        assert!(response.exists);

        let response = exists_handler(State(state), path("other", "k"))
            .await
            .unwrap();
        assert!(!response.exists);
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let state = test_state();
        state.cache("a").unwrap().set("k", json!(1), None).unwrap();
        state.cache("ab").unwrap().set("k", json!(2), None).unwrap();

        let response = clear_handler(State(state.clone()), Path("a".to_string()))
            .await
            .unwrap();
        assert_eq!(response.namespace, "a");

        assert!(!state.cache("a").unwrap().has("k").unwrap());
        assert!(state.cache("ab").unwrap().has("k").unwrap());
    }

    #[tokio::test]
    async fn test_clear_handler_rejects_namespace_with_separator() {
        let result = clear_handler(State(test_state()), Path("a_b".to_string())).await;
        assert!(matches!(result, Err(CacheError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_batch_handlers() {
        let state = test_state();

        let req = SetMultipleRequest {
            values: [("a".to_string(), json!(1)), ("b".to_string(), json!(2))]
                .into_iter()
                .collect(),
            ttl: None,
        };
        let response = set_multiple_handler(State(state.clone()), Path("ns".to_string()), Json(req))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.count, 2);

        let req = GetMultipleRequest {
            keys: vec!["a".to_string(), "c".to_string()],
            default: json!(0),
        };
        let response = get_multiple_handler(State(state.clone()), Path("ns".to_string()), Json(req))
            .await
            .unwrap();
        assert_eq!(response.values["a"], json!(1));
        assert_eq!(response.values["c"], json!(0));

        let req = DeleteMultipleRequest {
            keys: vec!["a".to_string(), "b".to_string()],
        };
        let response =
            delete_multiple_handler(State(state), Path("ns".to_string()), Json(req))
                .await
                .unwrap();
        assert!(response.success);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let response = stats_handler(State(test_state())).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_over_long_key() {
        let state = test_state();
        let key = "k".repeat(200);

        let req = SetRequest {
            value: json!(1),
            ttl: None,
        };
        let result = set_handler(State(state), path("ns", &key), Json(req)).await;
        assert!(matches!(result, Err(CacheError::KeyTooLong { .. })));
    }
}

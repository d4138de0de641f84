//! Whole-response cache keyed by request URL.
//!
//! [`cache_response`](middleware::cache_response) consults a
//! [`ResponseCache`] before the handler runs and stores successful (200)
//! responses afterwards. Two backends exist: [`RedisCache`] for production
//! and [`MemoryCache`] for local runs and tests.
//!
//! Entries never expire on their own. Eviction is left to the store:
//! `maxmemory-policy allkeys-lfu` on Redis, least recently used past a fixed
//! entry count in memory.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;

use crate::config::CacheConfig;

pub mod memory_cache;
pub mod middleware;
pub mod redis_cache;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;

/// Header name to every raw value sent under it, in response order.
pub type HeaderMultimap = IndexMap<String, Vec<Vec<u8>>>;

/// Errors from the cache layer.
///
/// [`CacheError::Miss`] is control flow, not a failure.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("no cache entry for key '{0}'")]
    Miss(String),

    #[error("cache store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("corrupt cache entry: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("corrupt cached header value: {0}")]
    HeaderEncoding(#[from] base64::DecodeError),
}

/// Serialize headers as JSON with base64 values, so bytes outside visible
/// ASCII survive.
pub fn encode_headers(headers: &HeaderMultimap) -> Result<Vec<u8>, serde_json::Error> {
    let encoded: IndexMap<&str, Vec<String>> = headers
        .iter()
        .map(|(name, values)| {
            let values = values.iter().map(|v| STANDARD.encode(v)).collect();
            (name.as_str(), values)
        })
        .collect();
    serde_json::to_vec(&encoded)
}

/// Inverse of [`encode_headers`].
pub fn decode_headers(raw: &[u8]) -> Result<HeaderMultimap, CacheError> {
    let encoded: IndexMap<String, Vec<String>> = serde_json::from_slice(raw)?;
    let mut headers = HeaderMultimap::with_capacity(encoded.len());
    for (name, values) in encoded {
        let values = values
            .iter()
            .map(|v| STANDARD.decode(v))
            .collect::<Result<Vec<_>, _>>()?;
        headers.insert(name, values);
    }
    Ok(headers)
}

/// A stored response: its headers and body. The status is always 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub headers: HeaderMultimap,
    pub body: Bytes,
}

impl CachedResponse {
    /// Capture `headers` and `body` of a response. Values are kept as raw
    /// bytes.
    pub fn capture(headers: &HeaderMap, body: Bytes) -> Self {
        let mut captured = HeaderMultimap::new();
        for (name, value) in headers {
            captured
                .entry(name.as_str().to_string())
                .or_default()
                .push(value.as_bytes().to_vec());
        }
        Self {
            headers: captured,
            body,
        }
    }
}

impl IntoResponse for CachedResponse {
    /// Replay every stored header value with status 200.
    fn into_response(self) -> Response {
        let mut response = (StatusCode::OK, self.body).into_response();
        let headers = response.headers_mut();
        // Drop the content-type the body conversion picked; the stored one
        // is replayed below.
        headers.clear();
        for (name, values) in &self.headers {
            let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
                continue;
            };
            for value in values {
                if let Ok(value) = HeaderValue::from_bytes(value) {
                    headers.append(name.clone(), value);
                }
            }
        }
        response
    }
}

/// A key-value store for whole responses.
///
/// Implementations must be safe for concurrent use; there is no per-key
/// locking, so concurrent misses on one key may both store (last write
/// wins).
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Look up `key`. An absent entry is [`CacheError::Miss`].
    async fn fetch(&self, key: &str) -> Result<CachedResponse, CacheError>;

    /// Store `entry` under `key`, replacing any previous entry.
    async fn store(&self, key: &str, entry: CachedResponse) -> Result<(), CacheError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

/// The cache as held in application state.
pub type SharedCache = Arc<dyn ResponseCache>;

/// Open the configured cache backend.
///
/// Without a Redis URL the in-process [`MemoryCache`] is used. It is not
/// shared between instances and holds at most `memory_entries` responses.
pub async fn connect(config: &CacheConfig) -> Result<SharedCache, CacheError> {
    match config.connection_info()? {
        Some(info) => {
            let cache = RedisCache::connect(info).await?;
            tracing::info!("Connected to Redis response cache");
            Ok(Arc::new(cache))
        }
        None => {
            tracing::warn!(
                capacity = config.memory_entries.get(),
                "REDIS_URL is not set, using the in-process memory cache"
            );
            Ok(Arc::new(MemoryCache::with_capacity(config.memory_entries)))
        }
    }
}

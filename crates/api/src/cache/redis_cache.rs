//! Redis backend: one hash per URL with fields `header` (JSON-encoded
//! header multimap, values base64) and `json` (response body).

use async_trait::async_trait;
use axum::body::Bytes;
use redis::aio::ConnectionManager;
use redis::ConnectionInfo;

use super::{decode_headers, encode_headers, CacheError, CachedResponse, ResponseCache};

const HEADER_FIELD: &str = "header";
const BODY_FIELD: &str = "json";

/// Response cache stored in Redis.
///
/// The [`ConnectionManager`] multiplexes one connection and reconnects on
/// failure, so clones are cheap and share it.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Connect, ping, and ask the store to evict least frequently used keys
    /// under memory pressure.
    ///
    /// Failing to set the eviction policy (e.g. `CONFIG` is disabled on a
    /// managed instance) is logged and otherwise ignored.
    pub async fn connect(info: ConnectionInfo) -> Result<Self, CacheError> {
        let client = redis::Client::open(info)?;
        let mut conn = ConnectionManager::new(client).await?;

        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        let policy: redis::RedisResult<()> = redis::cmd("CONFIG")
            .arg("SET")
            .arg("maxmemory-policy")
            .arg("allkeys-lfu")
            .query_async(&mut conn)
            .await;
        if let Err(err) = policy {
            tracing::warn!(error = %err, "Could not set Redis maxmemory-policy to allkeys-lfu");
        }

        Ok(Self { conn })
    }
}

#[async_trait]
impl ResponseCache for RedisCache {
    async fn fetch(&self, key: &str) -> Result<CachedResponse, CacheError> {
        let mut conn = self.conn.clone();
        let (header, body): (Option<Vec<u8>>, Option<Vec<u8>>) = redis::cmd("HMGET")
            .arg(key)
            .arg(HEADER_FIELD)
            .arg(BODY_FIELD)
            .query_async(&mut conn)
            .await?;

        let header = header.unwrap_or_default();
        let body = body.unwrap_or_default();
        if header.is_empty() && body.is_empty() {
            return Err(CacheError::Miss(key.to_string()));
        }

        Ok(CachedResponse {
            headers: decode_headers(&header)?,
            body: Bytes::from(body),
        })
    }

    async fn store(&self, key: &str, entry: CachedResponse) -> Result<(), CacheError> {
        let header = encode_headers(&entry.headers)?;
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("HSET")
            .arg(key)
            .arg(HEADER_FIELD)
            .arg(header)
            .arg(BODY_FIELD)
            .arg(entry.body.to_vec())
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

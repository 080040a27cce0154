//! Redis-backed remote tier.

use crate::domain::store::{KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Keys fetched per `SCAN` round trip.
const SCAN_BATCH: usize = 100;

/// Redis store with a lazily established connection.
///
/// The connection is opened on first use. [`OnceCell`] allows a single
/// attempt in flight; a failed attempt leaves the cell empty so the next
/// call retries. Every command is bounded by `op_timeout`.
pub struct RedisStore {
    client: Client,
    conn: OnceCell<ConnectionManager>,
    key_prefix: String,
    op_timeout: Duration,
}

impl RedisStore {
    /// Creates the store without connecting.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL cannot be parsed.
    pub fn new(
        redis_url: &str,
        key_prefix: impl Into<String>,
        op_timeout: Duration,
    ) -> StoreResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        Ok(Self {
            client,
            conn: OnceCell::new(),
            key_prefix: key_prefix.into(),
            op_timeout,
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    fn strip_key<'a>(&self, redis_key: &'a str) -> Option<&'a str> {
        redis_key.strip_prefix(self.key_prefix.as_str())
    }

    /// `SCAN` pattern matching every key of this store, with glob
    /// metacharacters in the prefix escaped.
    fn scan_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.key_prefix.len() + 1);
        for c in self.key_prefix.chars() {
            if matches!(c, '*' | '?' | '[' | ']' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('*');
        pattern
    }

    fn timeout_ms(&self) -> u64 {
        self.op_timeout.as_millis() as u64
    }

    async fn with_timeout<T, F>(&self, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout_ms()))?
    }

    /// Returns the shared connection, establishing it if needed.
    async fn connection(&self) -> StoreResult<ConnectionManager> {
        let manager = self
            .conn
            .get_or_try_init(|| async {
                info!("Connecting to Redis");

                let manager = self
                    .with_timeout(async {
                        ConnectionManager::new(self.client.clone())
                            .await
                            .map_err(|e| {
                                StoreError::Connection(format!("Failed to connect to Redis: {}", e))
                            })
                    })
                    .await;

                match &manager {
                    Ok(_) => info!("✓ Connected to Redis"),
                    Err(e) => warn!("Redis connection attempt failed: {}", e),
                }

                manager
            })
            .await?;

        Ok(manager.clone())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.connection().await?;
        let redis_key = self.build_key(key);

        let value = self
            .with_timeout(async {
                conn.get::<_, Option<String>>(&redis_key)
                    .await
                    .map_err(|e| StoreError::Operation(format!("GET {}: {}", key, e)))
            })
            .await?;

        match &value {
            Some(_) => debug!("Redis HIT: {}", key),
            None => debug!("Redis MISS: {}", key),
        }

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let redis_key = self.build_key(key);

        self.with_timeout(async {
            conn.set::<_, _, ()>(&redis_key, value)
                .await
                .map_err(|e| StoreError::Operation(format!("SET {}: {}", key, e)))
        })
        .await?;

        debug!("Redis SET: {} -> {}", key, value);
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut conn = self.connection().await?;
        let redis_key = self.build_key(key);

        let inserted = self
            .with_timeout(async {
                conn.set_nx::<_, _, bool>(&redis_key, value)
                    .await
                    .map_err(|e| StoreError::Operation(format!("SETNX {}: {}", key, e)))
            })
            .await?;

        debug!("Redis SETNX: {} -> {} (inserted: {})", key, value, inserted);
        Ok(inserted)
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        let mut conn = self.connection().await?;
        let pattern = self.scan_pattern();

        let raw_keys = self
            .with_timeout(async {
                let mut found = BTreeSet::new();
                let mut cursor: u64 = 0;

                loop {
                    let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                        .arg(cursor)
                        .arg("MATCH")
                        .arg(&pattern)
                        .arg("COUNT")
                        .arg(SCAN_BATCH)
                        .query_async(&mut conn)
                        .await
                        .map_err(|e| StoreError::Operation(format!("SCAN: {}", e)))?;

                    found.extend(batch);

                    if next == 0 {
                        break;
                    }
                    cursor = next;
                }

                Ok::<_, StoreError>(found)
            })
            .await?;

        Ok(raw_keys
            .iter()
            .filter_map(|k| self.strip_key(k))
            .map(str::to_string)
            .collect())
    }

    async fn health_check(&self) -> bool {
        let Ok(mut conn) = self.connection().await else {
            return false;
        };

        self.with_timeout(async {
            conn.ping::<()>()
                .await
                .map_err(|e| StoreError::Operation(format!("PING: {}", e)))
        })
        .await
        .is_ok()
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(prefix: &str) -> RedisStore {
        RedisStore::new("redis://127.0.0.1:6379/0", prefix, Duration::from_millis(50)).unwrap()
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = RedisStore::new("not a url", "url:", Duration::from_millis(50));
        assert!(matches!(result, Err(StoreError::Connection(_))));
    }

    #[test]
    fn test_build_and_strip_key() {
        let store = store("url:");
        assert_eq!(store.build_key("abc123$pw"), "url:abc123$pw");
        assert_eq!(store.strip_key("url:abc123"), Some("abc123"));
        assert_eq!(store.strip_key("other:abc123"), None);
    }

    #[test]
    fn test_scan_pattern_escapes_glob() {
        assert_eq!(store("url:").scan_pattern(), "url:*");
        assert_eq!(store("a*b[").scan_pattern(), "a\\*b\\[*");
        assert_eq!(store("").scan_pattern(), "*");
    }

    #[tokio::test]
    async fn test_unreachable_redis_degrades_to_errors() {
        // Port 1 is never a Redis server; every call must fail without panicking.
        let store =
            RedisStore::new("redis://127.0.0.1:1/0", "url:", Duration::from_millis(200)).unwrap();

        assert!(store.get("abc123").await.is_err());
        assert!(store.keys().await.is_err());
        assert!(!store.health_check().await);
    }
}

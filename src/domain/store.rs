//! Contract of the durable, possibly remote key-value store.

use async_trait::async_trait;

/// Errors raised by a [`KeyValueStore`].
///
/// None of these ever reach a redirect caller: the tiered cache treats them
/// as a miss at the remote tier.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation error: {0}")]
    Operation(String),

    #[error("Store operation timed out after {0}ms")]
    Timeout(u64),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable mapping from short key to destination URL.
///
/// Implementations must be thread-safe. The store may be absent or
/// unreachable at any time; callers are expected to degrade gracefully.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed store with lazy connection
/// - [`crate::infrastructure::store::NullStore`] - Inert store used when no remote is configured
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Looks up the value stored under `key`.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Atomically stores `value` only if `key` is not present.
    ///
    /// Returns `Ok(false)` if the key already existed.
    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Enumerates every key held by the store.
    async fn keys(&self) -> StoreResult<Vec<String>>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Returns false for inert stores that never hold data.
    fn is_enabled(&self) -> bool;
}

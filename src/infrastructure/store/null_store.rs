//! No-op store used when no remote is configured.

use crate::domain::store::{KeyValueStore, StoreResult};
use async_trait::async_trait;
use tracing::debug;

/// A store that holds nothing.
///
/// Every lookup misses, every write succeeds without effect and enumeration
/// is empty. Lets the service run on the memory and seed tiers alone.
pub struct NullStore;

impl NullStore {
    pub fn new() -> Self {
        debug!("Using NullStore (remote tier disabled)");
        Self
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for NullStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Ok(())
    }

    async fn set_if_absent(&self, _key: &str, _value: &str) -> StoreResult<bool> {
        Ok(true)
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

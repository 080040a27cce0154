#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use keyhop::domain::{KeyValueStore, NotificationSink, NotifyError, StoreError, StoreResult};
use keyhop::infrastructure::notify::NullNotifier;
use keyhop::infrastructure::store::{NullStore, StaticSeed};
use keyhop::routes::build_router;
use keyhop::{AppState, application::services::TieredCache};

/// Remote store kept in a plain map, counting reads.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
    gets: AtomicUsize,
}

impl InMemoryStore {
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        {
            let mut map = store.entries.lock().unwrap();
            for (k, v) in entries {
                map.insert(k.to_string(), v.to_string());
            }
        }
        store
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut map = self.entries.lock().unwrap();
        if map.contains_key(key) {
            return Ok(false);
        }
        map.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.lock().unwrap().keys().cloned().collect())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Configured remote store that fails every operation.
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn set_if_absent(&self, _key: &str, _value: &str) -> StoreResult<bool> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        Err(StoreError::Timeout(200))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Notifier forwarding every message to a channel.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<String>,
}

#[async_trait]
impl NotificationSink for ChannelNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        self.tx
            .send(text.to_string())
            .map_err(|e| NotifyError::Transport(e.to_string()))
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

pub fn channel_notifier() -> (Arc<ChannelNotifier>, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Arc::new(ChannelNotifier { tx }), rx)
}

pub fn create_cache(seed: StaticSeed, remote: Arc<dyn KeyValueStore>) -> Arc<TieredCache> {
    Arc::new(TieredCache::new(seed, remote))
}

pub fn create_test_state(remote: Arc<dyn KeyValueStore>) -> AppState {
    let cache = create_cache(StaticSeed::empty(), remote);
    AppState::new(cache, Arc::new(NullNotifier::new()), None, 4)
}

pub fn create_offline_state() -> AppState {
    create_test_state(Arc::new(NullStore::new()))
}

/// Full application router with an empty static directory.
pub fn create_test_server(state: AppState) -> (TestServer, tempfile::TempDir) {
    let static_dir = tempfile::tempdir().unwrap();
    let app = build_router(state, static_dir.path());
    (TestServer::new(app).unwrap(), static_dir)
}

//! Tiered key lookup: memory, then static seed, then remote store.

use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, warn};

use crate::domain::store::KeyValueStore;
use crate::infrastructure::store::StaticSeed;

/// Storage tier, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Memory,
    StaticSeed,
    Remote,
}

/// Single lookup/write/enumerate interface over three storage tiers.
///
/// Lookups check [`Tier::Memory`], then [`Tier::StaticSeed`], then
/// [`Tier::Remote`]; the first hit wins. A remote hit is copied into memory
/// before it is returned. The seed table is never written to.
///
/// Remote failures are logged and treated as misses. None of the methods
/// here return an error.
pub struct TieredCache {
    memory: DashMap<String, String>,
    seed: StaticSeed,
    remote: Arc<dyn KeyValueStore>,
}

impl TieredCache {
    pub fn new(seed: StaticSeed, remote: Arc<dyn KeyValueStore>) -> Self {
        Self {
            memory: DashMap::new(),
            seed,
            remote,
        }
    }

    /// Returns the value stored under `key`, if any tier has it.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.get_with_tier(key).await.map(|(value, _)| value)
    }

    /// Like [`Self::get`], also reporting which tier answered.
    pub async fn get_with_tier(&self, key: &str) -> Option<(String, Tier)> {
        if let Some(value) = self.memory.get(key) {
            debug!("Memory HIT: {}", key);
            return Some((value.clone(), Tier::Memory));
        }

        if let Some(value) = self.seed.get(key) {
            debug!("Seed HIT: {}", key);
            return Some((value.to_string(), Tier::StaticSeed));
        }

        match self.remote.get(key).await {
            Ok(Some(value)) => {
                // Keep a value written to memory while the remote call was in flight.
                let value = self
                    .memory
                    .entry(key.to_string())
                    .or_insert(value)
                    .value()
                    .clone();
                debug!("Remote HIT: {} (promoted to memory)", key);
                Some((value, Tier::Remote))
            }
            Ok(None) => {
                debug!("MISS: {}", key);
                None
            }
            Err(e) => {
                warn!("Remote lookup failed for {}, treating as miss: {}", key, e);
                None
            }
        }
    }

    /// Stores `value` under `key` in memory and, best effort, in the remote.
    ///
    /// A remote failure is logged; the value stays available from memory
    /// for the lifetime of the process.
    pub async fn set(&self, key: &str, value: &str) {
        self.memory.insert(key.to_string(), value.to_string());

        if let Err(e) = self.remote.set(key, value).await {
            warn!("Remote write failed for {}, kept in memory only: {}", key, e);
        }
    }

    /// Stores `value` under `key` only if no tier already holds the key.
    ///
    /// Memory is claimed atomically first, then the remote is asked for a
    /// conditional insert. If the remote already has the key the memory
    /// claim is rolled back. A remote error keeps the memory claim.
    ///
    /// Returns `false` if the key was taken.
    pub async fn insert_new(&self, key: &str, value: &str) -> bool {
        if self.seed.contains(key) {
            debug!("Key {} is reserved by the seed table", key);
            return false;
        }

        match self.memory.entry(key.to_string()) {
            Entry::Occupied(_) => {
                debug!("Key {} already in memory", key);
                return false;
            }
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
            }
        }

        match self.remote.set_if_absent(key, value).await {
            Ok(true) => true,
            Ok(false) => {
                self.memory.remove_if(key, |_, v| v == value);
                debug!("Key {} already in remote store", key);
                false
            }
            Err(e) => {
                warn!("Remote write failed for {}, kept in memory only: {}", key, e);
                true
            }
        }
    }

    /// Returns every key known to any tier, deduplicated and sorted.
    ///
    /// A remote enumeration failure degrades to the seed and memory keys.
    pub async fn keys(&self) -> BTreeSet<String> {
        let mut keys: BTreeSet<String> = self.seed.keys().map(str::to_string).collect();
        keys.extend(self.memory.iter().map(|entry| entry.key().clone()));

        match self.remote.keys().await {
            Ok(remote_keys) => keys.extend(remote_keys),
            Err(e) => warn!("Remote enumeration failed, using local tiers only: {}", e),
        }

        keys
    }

    /// Number of entries currently held in the memory tier.
    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote.is_enabled()
    }

    pub async fn remote_health(&self) -> bool {
        self.remote.health_check().await
    }
}

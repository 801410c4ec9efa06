//! The tag cache seam used by the read gateway and the revalidator.

use std::time::{Duration, Instant};

use metrics::counter;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::tags::CacheTag;

use super::config::CacheConfig;
use super::keys::CacheKey;
use super::registry::{TagRegistry, TagSnapshot};
use super::store::{CachedRead, ResponseStore};

const METRIC_HIT: &str = "medistore_cache_hit_total";
const METRIC_MISS: &str = "medistore_cache_miss_total";
const METRIC_EVICT: &str = "medistore_cache_evict_total";
const METRIC_INVALIDATE: &str = "medistore_cache_invalidate_total";

/// Whether a lookup honours the entry's revalidate window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    WithinWindow,
    IgnoreWindow,
}

/// Tagged read cache. Implementations must treat invalidation of an unknown
/// tag, or of the same tag twice, as a no-op beyond staling current entries.
pub trait TagCache: Send + Sync {
    /// Return a cached body whose tags are all still current.
    fn lookup(&self, key: &CacheKey, freshness: Freshness) -> Option<Value>;

    /// Capture tag generations before fetching a read.
    fn snapshot(&self, tags: &[CacheTag]) -> TagSnapshot;

    /// Tag a fetched body. Dropped if any tag was invalidated after `snapshot`.
    fn store(
        &self,
        key: CacheKey,
        snapshot: TagSnapshot,
        revalidate: Option<Duration>,
        body: Value,
    );

    /// Mark every read carrying `tag` as stale.
    fn invalidate(&self, tag: &CacheTag);
}

/// Process-local [`TagCache`]: an LRU of bodies plus per-tag generations.
pub struct InMemoryTagCache {
    config: CacheConfig,
    registry: TagRegistry,
    store: ResponseStore,
}

impl InMemoryTagCache {
    pub fn new(config: CacheConfig) -> Self {
        let store = ResponseStore::new(&config);
        Self {
            config,
            registry: TagRegistry::new(),
            store,
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn discard(&self, key: &CacheKey) {
        self.store.remove(key);
        self.registry.unregister(key);
    }

    fn usable(&self, entry: &CachedRead, freshness: Freshness) -> bool {
        if !self.registry.is_current(&entry.snapshot) {
            return false;
        }
        match freshness {
            Freshness::IgnoreWindow => true,
            Freshness::WithinWindow => entry.is_within_window(Instant::now()),
        }
    }
}

impl TagCache for InMemoryTagCache {
    fn lookup(&self, key: &CacheKey, freshness: Freshness) -> Option<Value> {
        if !self.config.enabled {
            return None;
        }

        match self.store.get(key) {
            Some(entry) if self.usable(&entry, freshness) => {
                counter!(METRIC_HIT).increment(1);
                debug!(url = key.url(), "cache hit");
                Some(entry.body)
            }
            Some(_) => {
                self.discard(key);
                counter!(METRIC_MISS).increment(1);
                debug!(url = key.url(), "cache entry stale");
                None
            }
            None => {
                counter!(METRIC_MISS).increment(1);
                None
            }
        }
    }

    fn snapshot(&self, tags: &[CacheTag]) -> TagSnapshot {
        self.registry.snapshot(tags)
    }

    fn store(
        &self,
        key: CacheKey,
        snapshot: TagSnapshot,
        revalidate: Option<Duration>,
        body: Value,
    ) {
        if !self.config.enabled {
            return;
        }
        if !self.registry.is_current(&snapshot) {
            debug!(url = key.url(), "read raced an invalidation; not cached");
            return;
        }

        let revalidate = revalidate.or_else(|| self.config.default_revalidate());
        self.registry.register(&key, &snapshot);
        let entry = CachedRead::new(body, snapshot, revalidate);
        if let Some(evicted) = self.store.put(key, entry) {
            self.registry.unregister(&evicted);
            counter!(METRIC_EVICT).increment(1);
        }
    }

    fn invalidate(&self, tag: &CacheTag) {
        let event = self.registry.invalidate(tag);
        for key in &event.affected {
            self.store.remove(key);
        }
        counter!(METRIC_INVALIDATE).increment(1);
        info!(
            event_id = %event.id,
            tag = %event.tag,
            generation = event.generation,
            dropped = event.affected.len(),
            "cache tag invalidated"
        );
    }
}

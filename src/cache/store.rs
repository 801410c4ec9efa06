//! LRU store of cached read bodies.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde_json::Value;

use super::config::CacheConfig;
use super::keys::CacheKey;
use super::lock::{rw_read, rw_write};
use super::registry::TagSnapshot;

const SOURCE: &str = "medistore::cache::store";

#[derive(Debug, Clone)]
pub struct CachedRead {
    pub body: Value,
    pub snapshot: TagSnapshot,
    pub stored_at: Instant,
    /// `None` means the entry never ages out on its own.
    pub revalidate: Option<Duration>,
}

impl CachedRead {
    pub fn new(body: Value, snapshot: TagSnapshot, revalidate: Option<Duration>) -> Self {
        Self {
            body,
            snapshot,
            stored_at: Instant::now(),
            revalidate,
        }
    }

    pub fn is_within_window(&self, now: Instant) -> bool {
        match self.revalidate {
            Some(window) => now.saturating_duration_since(self.stored_at) < window,
            None => true,
        }
    }
}

pub struct ResponseStore {
    entries: RwLock<LruCache<CacheKey, CachedRead>>,
}

impl ResponseStore {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(config.response_limit)),
        }
    }

    /// Fetch an entry and mark it most recently used.
    pub fn get(&self, key: &CacheKey) -> Option<CachedRead> {
        let mut entries = rw_write(&self.entries, SOURCE, "get");
        entries.get(key).cloned()
    }

    /// Insert an entry. Returns the key evicted to make room, if any.
    pub fn put(&self, key: CacheKey, entry: CachedRead) -> Option<CacheKey> {
        let mut entries = rw_write(&self.entries, SOURCE, "put");
        match entries.push(key.clone(), entry) {
            Some((evicted, _)) if evicted != key => Some(evicted),
            _ => None,
        }
    }

    pub fn remove(&self, key: &CacheKey) -> Option<CachedRead> {
        rw_write(&self.entries, SOURCE, "remove").pop(key)
    }

    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use medistore::Storefront;
use medistore::cache::{CacheConfig, CacheKey, Freshness, InMemoryTagCache, TagCache, TagSnapshot};
use medistore::config::{ApiSettings, CacheSettings, LogFormat, LoggingSettings, Settings};
use medistore::domain::mutations::InvalidationPolicy;
use medistore::domain::session::Session;
use medistore::domain::tags::CacheTag;
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use url::Url;

/// Base that refuses connections; any request sent there fails in transport.
pub const UNROUTABLE: &str = "http://127.0.0.1:9";

/// A real in-memory tag cache that also records every invalidation.
pub struct RecordingTagCache {
    inner: InMemoryTagCache,
    invalidated: Mutex<Vec<CacheTag>>,
    windows: Mutex<Vec<Option<Duration>>>,
}

impl RecordingTagCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: InMemoryTagCache::new(config),
            invalidated: Mutex::new(Vec::new()),
            windows: Mutex::new(Vec::new()),
        }
    }

    /// Invalidated tag names, in order.
    pub fn invalidated(&self) -> Vec<String> {
        self.invalidated
            .lock()
            .expect("log lock")
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Revalidate windows of every stored read, in order.
    pub fn windows(&self) -> Vec<Option<Duration>> {
        self.windows.lock().expect("log lock").clone()
    }

    pub fn reset(&self) {
        self.invalidated.lock().expect("log lock").clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl TagCache for RecordingTagCache {
    fn lookup(&self, key: &CacheKey, freshness: Freshness) -> Option<Value> {
        self.inner.lookup(key, freshness)
    }

    fn snapshot(&self, tags: &[CacheTag]) -> TagSnapshot {
        self.inner.snapshot(tags)
    }

    fn store(&self, key: CacheKey, snapshot: TagSnapshot, revalidate: Option<Duration>, body: Value) {
        self.windows.lock().expect("log lock").push(revalidate);
        self.inner.store(key, snapshot, revalidate, body);
    }

    fn invalidate(&self, tag: &CacheTag) {
        self.invalidated.lock().expect("log lock").push(tag.clone());
        self.inner.invalidate(tag);
    }
}

pub fn settings(base: &str, policy: InvalidationPolicy) -> Settings {
    Settings {
        api: ApiSettings {
            base_url: Url::parse(base).expect("base url"),
            timeout: Some(Duration::from_secs(5)),
        },
        logging: LoggingSettings {
            level: LevelFilter::WARN,
            format: LogFormat::Compact,
        },
        cache: CacheSettings {
            enabled: true,
            response_limit: NonZeroUsize::new(64).expect("non-zero"),
            default_revalidate_seconds: 300,
            invalidation_policy: policy,
        },
    }
}

pub fn storefront(base: &str, policy: InvalidationPolicy) -> (Storefront, Arc<RecordingTagCache>) {
    let settings = settings(base, policy);
    let cache = Arc::new(RecordingTagCache::new(CacheConfig::from(&settings.cache)));
    let storefront =
        Storefront::with_cache(&settings, cache.clone(), policy).expect("storefront builds");
    (storefront, cache)
}

pub fn session(cookie: &str) -> Session {
    Session::new(cookie).expect("session")
}

pub fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

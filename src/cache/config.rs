//! Cache configuration, resolved from the `[cache]` settings section.

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::config::{CacheSettings, DEFAULT_RESPONSE_LIMIT, DEFAULT_REVALIDATE_SECS};
use crate::domain::mutations::InvalidationPolicy;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Serve and store reads through the in-process tag cache.
    pub enabled: bool,
    /// Maximum cached read responses (LRU).
    pub response_limit: NonZeroUsize,
    /// Revalidate window for reads that do not set one; 0 means no window.
    pub default_revalidate_seconds: u64,
    /// When mutation wrappers invalidate.
    pub invalidation_policy: InvalidationPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            response_limit: DEFAULT_RESPONSE_LIMIT,
            default_revalidate_seconds: DEFAULT_REVALIDATE_SECS,
            invalidation_policy: InvalidationPolicy::OnSuccess,
        }
    }
}

impl From<&CacheSettings> for CacheConfig {
    fn from(settings: &CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            response_limit: settings.response_limit,
            default_revalidate_seconds: settings.default_revalidate_seconds,
            invalidation_policy: settings.invalidation_policy,
        }
    }
}

impl CacheConfig {
    pub fn default_revalidate(&self) -> Option<Duration> {
        (self.default_revalidate_seconds > 0)
            .then(|| Duration::from_secs(self.default_revalidate_seconds))
    }
}

//! Per-read caching directives.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Fetch cache mode attached to a read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CacheMode {
    /// Serve a cached entry while it is inside its revalidate window.
    #[default]
    Default,
    /// Neither consult nor populate the cache.
    NoStore,
    /// Always refetch, then store.
    NoCache,
    /// Always refetch, then store.
    Reload,
    /// Serve any entry whose tags are still current, ignoring the window.
    ForceCache,
}

impl CacheMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::NoStore => "no-store",
            Self::NoCache => "no-cache",
            Self::Reload => "reload",
            Self::ForceCache => "force-cache",
        }
    }

    pub fn may_serve_cached(self) -> bool {
        matches!(self, Self::Default | Self::ForceCache)
    }

    pub fn may_store(self) -> bool {
        self != Self::NoStore
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cache mode `{0}`")]
pub struct UnknownCacheMode(pub String);

impl FromStr for CacheMode {
    type Err = UnknownCacheMode;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "default" => Ok(Self::Default),
            "no-store" => Ok(Self::NoStore),
            "no-cache" => Ok(Self::NoCache),
            "reload" => Ok(Self::Reload),
            "force-cache" => Ok(Self::ForceCache),
            other => Err(UnknownCacheMode(other.to_string())),
        }
    }
}

/// Cache mode and revalidate window for one read. Unset fields fall back to
/// the service default, then to the configured default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheDirective {
    pub cache: Option<CacheMode>,
    pub revalidate: Option<Duration>,
}

impl CacheDirective {
    pub fn mode(mode: CacheMode) -> Self {
        Self {
            cache: Some(mode),
            revalidate: None,
        }
    }

    pub fn no_store() -> Self {
        Self::mode(CacheMode::NoStore)
    }

    pub fn revalidate_secs(seconds: u64) -> Self {
        Self {
            cache: None,
            revalidate: Some(Duration::from_secs(seconds)),
        }
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            cache: self.cache.or(fallback.cache),
            revalidate: self.revalidate.or(fallback.revalidate),
        }
    }

    pub fn effective_mode(&self) -> CacheMode {
        self.cache.unwrap_or_default()
    }
}

//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroUsize, path::PathBuf, str::FromStr, time::Duration};

use clap::{Args, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::domain::mutations::InvalidationPolicy;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "medistore";
const ENV_PREFIX: &str = "MEDISTORE";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub(crate) const DEFAULT_RESPONSE_LIMIT: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(limit) => limit,
    None => NonZeroUsize::MIN,
};
pub(crate) const DEFAULT_REVALIDATE_SECS: u64 = 300;

/// Global flags that override file and environment settings.
#[derive(Debug, Args, Default, Clone)]
pub struct ConfigOverrides {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "MEDISTORE_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    /// Override the API origin (e.g. https://api.example.com/api/v1).
    #[arg(long = "api-base-url", value_name = "URL", global = true)]
    pub api_base_url: Option<String>,

    /// Override the outbound request timeout; 0 disables it.
    #[arg(long = "api-timeout-seconds", value_name = "SECONDS", global = true)]
    pub api_timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Toggle the in-process read cache.
    #[arg(
        long = "cache-enabled",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub cache_enabled: Option<bool>,

    /// Override when writes invalidate cached reads (on_success|legacy).
    #[arg(long = "invalidation-policy", value_name = "POLICY", global = true)]
    pub invalidation_policy: Option<String>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    /// `None` means requests never time out.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub enabled: bool,
    pub response_limit: NonZeroUsize,
    pub default_revalidate_seconds: u64,
    pub invalidation_policy: InvalidationPolicy,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(overrides: &ConfigOverrides) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = overrides.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(overrides);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    logging: RawLoggingSettings,
    cache: RawCacheSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    enabled: Option<bool>,
    response_limit: Option<usize>,
    default_revalidate_seconds: Option<u64>,
    invalidation_policy: Option<String>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = overrides.api_base_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(seconds) = overrides.api_timeout_seconds {
            self.api.timeout_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(enabled) = overrides.cache_enabled {
            self.cache.enabled = Some(enabled);
        }
        if let Some(policy) = overrides.invalidation_policy.as_ref() {
            self.cache.invalidation_policy = Some(policy.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            logging,
            cache,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            logging: build_logging_settings(logging)?,
            cache: build_cache_settings(cache)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let raw_url = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            LoadError::invalid(
                "api.base_url",
                "must be set (config file, MEDISTORE__API__BASE_URL or --api-base-url)",
            )
        })?;

    let base_url = Url::parse(&raw_url)
        .map_err(|err| LoadError::invalid("api.base_url", format!("failed to parse: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.base_url",
            format!("unsupported scheme `{}`", base_url.scheme()),
        ));
    }
    if base_url.query().is_some() || base_url.fragment().is_some() {
        return Err(LoadError::invalid(
            "api.base_url",
            "must not carry a query or fragment",
        ));
    }

    let timeout_seconds = api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS);
    let timeout = (timeout_seconds > 0).then(|| Duration::from_secs(timeout_seconds));

    Ok(ApiSettings { base_url, timeout })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheSettings, LoadError> {
    let response_limit = cache.response_limit.map_or(DEFAULT_RESPONSE_LIMIT, |limit| {
        NonZeroUsize::new(limit).unwrap_or(NonZeroUsize::MIN)
    });

    let invalidation_policy = match cache.invalidation_policy {
        Some(raw) => InvalidationPolicy::from_str(&raw)
            .map_err(|err| LoadError::invalid("cache.invalidation_policy", err.to_string()))?,
        None => InvalidationPolicy::default(),
    };

    Ok(CacheSettings {
        enabled: cache.enabled.unwrap_or(true),
        response_limit,
        default_revalidate_seconds: cache
            .default_revalidate_seconds
            .unwrap_or(DEFAULT_REVALIDATE_SECS),
        invalidation_policy,
    })
}

#[cfg(test)]
mod tests;

use std::io::Write;

use super::*;

fn raw_with_base() -> RawSettings {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("https://api.example.com/api/v1".to_string());
    raw
}

#[test]
fn defaults_apply_once_base_url_is_set() {
    let settings = Settings::from_raw(raw_with_base()).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "https://api.example.com/api/v1");
    assert_eq!(settings.api.timeout, Some(Duration::from_secs(15)));
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert!(settings.cache.enabled);
    assert_eq!(settings.cache.response_limit.get(), 256);
    assert_eq!(settings.cache.default_revalidate_seconds, 300);
    assert_eq!(
        settings.cache.invalidation_policy,
        InvalidationPolicy::OnSuccess
    );
}

#[test]
fn missing_base_url_is_rejected() {
    let err = Settings::from_raw(RawSettings::default()).expect_err("base url required");
    assert!(matches!(err, LoadError::Invalid { key: "api.base_url", .. }));
}

#[test]
fn non_http_base_url_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("ftp://example.com".to_string());
    let err = Settings::from_raw(raw).expect_err("scheme rejected");
    assert!(err.to_string().contains("unsupported scheme"));
}

#[test]
fn zero_timeout_disables_it() {
    let mut raw = raw_with_base();
    raw.api.timeout_seconds = Some(0);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.api.timeout, None);
}

#[test]
fn response_limit_is_clamped_to_one() {
    let mut raw = raw_with_base();
    raw.cache.response_limit = Some(0);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.cache.response_limit.get(), 1);
}

#[test]
fn unknown_policy_is_rejected() {
    let mut raw = raw_with_base();
    raw.cache.invalidation_policy = Some("sometimes".to_string());
    let err = Settings::from_raw(raw).expect_err("policy rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "cache.invalidation_policy",
            ..
        }
    ));
}

#[test]
fn bad_log_level_is_rejected() {
    let mut raw = raw_with_base();
    raw.logging.level = Some("loud".to_string());
    let err = Settings::from_raw(raw).expect_err("level rejected");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = raw_with_base();
    raw.logging.level = Some("info".to_string());
    raw.cache.invalidation_policy = Some("on_success".to_string());

    let overrides = ConfigOverrides {
        api_base_url: Some("http://localhost:9000/api".to_string()),
        log_level: Some("debug".to_string()),
        log_json: Some(true),
        cache_enabled: Some(false),
        invalidation_policy: Some("legacy".to_string()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "http://localhost:9000/api");
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert!(matches!(settings.logging.format, LogFormat::Json));
    assert!(!settings.cache.enabled);
    assert_eq!(settings.cache.invalidation_policy, InvalidationPolicy::Legacy);
}

#[test]
fn load_reads_explicit_config_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        r#"
[api]
base_url = "https://shop.example.com/api"
timeout_seconds = 5

[cache]
default_revalidate_seconds = 0
invalidation_policy = "legacy"
"#
    )
    .expect("write config");

    let overrides = ConfigOverrides {
        config_file: Some(file.path().to_path_buf()),
        log_level: Some("warn".to_string()),
        ..Default::default()
    };
    let settings = load(&overrides).expect("settings load");

    assert_eq!(settings.api.base_url.as_str(), "https://shop.example.com/api");
    assert_eq!(settings.api.timeout, Some(Duration::from_secs(5)));
    assert_eq!(settings.cache.default_revalidate_seconds, 0);
    assert_eq!(settings.cache.invalidation_policy, InvalidationPolicy::Legacy);
    assert_eq!(settings.logging.level, LevelFilter::WARN);
}

#[test]
fn load_fails_for_missing_config_file() {
    let overrides = ConfigOverrides {
        config_file: Some(PathBuf::from("/nonexistent/medistore.toml")),
        ..Default::default()
    };
    assert!(matches!(load(&overrides), Err(LoadError::Build(_))));
}

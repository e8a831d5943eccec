use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn assert_invalid(map: &HashMap<&str, &str>, expected_var: &str) {
    let result = build_app_config(lookup_from_map(map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == expected_var),
        "expected InvalidEnvVar({expected_var}), got: {result:?}"
    );
}

#[test]
fn parse_environment_variants() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_defaults() {
    let map = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:5000");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.page_size, 12);
    assert_eq!(cfg.request_timeout_secs, 120);
    assert_eq!(cfg.user_agent, "pricelens/0.1 (price-comparison)");
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_ms, 500);
    assert_eq!(cfg.export_dir, std::path::PathBuf::from("."));
}

#[test]
fn log_level_default_follows_environment() {
    let production = HashMap::from([("PRICELENS_ENV", "production")]);
    let cfg = build_app_config(lookup_from_map(&production)).unwrap();
    assert_eq!(cfg.log_level, "warn");

    let test = HashMap::from([("PRICELENS_ENV", "test")]);
    let cfg = build_app_config(lookup_from_map(&test)).unwrap();
    assert_eq!(cfg.log_level, "debug");

    let explicit = HashMap::from([
        ("PRICELENS_ENV", "production"),
        ("PRICELENS_LOG_LEVEL", "trace"),
    ]);
    let cfg = build_app_config(lookup_from_map(&explicit)).unwrap();
    assert_eq!(cfg.log_level, "trace");
}

#[test]
fn build_app_config_overrides() {
    let map = HashMap::from([
        ("PRICELENS_API_BASE_URL", "https://prices.example.com/"),
        ("PRICELENS_ENV", "production"),
        ("PRICELENS_LOG_LEVEL", "debug"),
        ("PRICELENS_PAGE_SIZE", "24"),
        ("PRICELENS_REQUEST_TIMEOUT_SECS", "30"),
        ("PRICELENS_USER_AGENT", "custom-agent/2.0"),
        ("PRICELENS_MAX_RETRIES", "0"),
        ("PRICELENS_RETRY_BACKOFF_BASE_MS", "50"),
        ("PRICELENS_EXPORT_DIR", "/tmp/exports"),
    ]);
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://prices.example.com/");
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.page_size, 24);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.retry_backoff_base_ms, 50);
    assert_eq!(cfg.export_dir, std::path::PathBuf::from("/tmp/exports"));
}

#[test]
fn build_app_config_rejects_zero_page_size() {
    assert_invalid(&HashMap::from([("PRICELENS_PAGE_SIZE", "0")]), "PRICELENS_PAGE_SIZE");
}

#[test]
fn build_app_config_rejects_non_numeric_page_size() {
    assert_invalid(
        &HashMap::from([("PRICELENS_PAGE_SIZE", "twelve")]),
        "PRICELENS_PAGE_SIZE",
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    assert_invalid(
        &HashMap::from([("PRICELENS_REQUEST_TIMEOUT_SECS", "0")]),
        "PRICELENS_REQUEST_TIMEOUT_SECS",
    );
}

#[test]
fn build_app_config_rejects_invalid_max_retries() {
    assert_invalid(
        &HashMap::from([("PRICELENS_MAX_RETRIES", "-1")]),
        "PRICELENS_MAX_RETRIES",
    );
}

#[test]
fn build_app_config_rejects_zero_backoff() {
    assert_invalid(
        &HashMap::from([("PRICELENS_RETRY_BACKOFF_BASE_MS", "0")]),
        "PRICELENS_RETRY_BACKOFF_BASE_MS",
    );
}

#[test]
fn build_app_config_rejects_base_url_without_scheme() {
    assert_invalid(
        &HashMap::from([("PRICELENS_API_BASE_URL", "127.0.0.1:5000")]),
        "PRICELENS_API_BASE_URL",
    );
}

#[test]
fn debug_output_redacts_base_url_credentials() {
    let map = HashMap::from([("PRICELENS_API_BASE_URL", "https://u:p@prices.example.com")]);
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(debug.contains("[redacted]"));
    assert!(!debug.contains("u:p@"));
}

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;
    use std::str::FromStr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_num = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        u64::from_str(raw.trim()).map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = parse_num(var, default)?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let api_base_url = or_default("PRICELENS_API_BASE_URL", "http://127.0.0.1:5000");
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(invalid(
            "PRICELENS_API_BASE_URL",
            "must start with http:// or https://".to_string(),
        ));
    }

    let env = parse_environment(&or_default("PRICELENS_ENV", "development"));
    let log_level = or_default("PRICELENS_LOG_LEVEL", env.default_log_level());

    let page_size = usize::try_from(parse_positive("PRICELENS_PAGE_SIZE", "12")?)
        .map_err(|e| invalid("PRICELENS_PAGE_SIZE", e.to_string()))?;
    let request_timeout_secs = parse_positive("PRICELENS_REQUEST_TIMEOUT_SECS", "120")?;
    let user_agent = or_default("PRICELENS_USER_AGENT", "pricelens/0.1 (price-comparison)");
    let max_retries = u32::try_from(parse_num("PRICELENS_MAX_RETRIES", "2")?)
        .map_err(|e| invalid("PRICELENS_MAX_RETRIES", e.to_string()))?;
    let retry_backoff_base_ms = parse_positive("PRICELENS_RETRY_BACKOFF_BASE_MS", "500")?;
    let export_dir = PathBuf::from(or_default("PRICELENS_EXPORT_DIR", "."));

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        page_size,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        export_dir,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

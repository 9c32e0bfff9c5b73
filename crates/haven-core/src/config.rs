use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("HAVEN_ENV", "development"));
    let bind_addr = parse_addr("HAVEN_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("HAVEN_LOG_LEVEL", "info");

    let geo_base_url = or_default(
        "HAVEN_GEO_BASE_URL",
        "https://nominatim.openstreetmap.org/search",
    );
    let geo_timeout_secs = parse_u64("HAVEN_GEO_TIMEOUT_SECS", "30")?;
    let geo_user_agent = or_default("HAVEN_GEO_USER_AGENT", "haven/0.1 (resource-discovery)");
    let geo_max_retries = parse_u32("HAVEN_GEO_MAX_RETRIES", "3")?;
    let geo_retry_backoff_base_ms = parse_u64("HAVEN_GEO_RETRY_BACKOFF_BASE_MS", "500")?;

    // Category entries stay fresh twice as long as free-text search entries:
    // search results are treated as more volatile.
    let category_ttl_secs = parse_u64("HAVEN_CATEGORY_TTL_SECS", "1800")?;
    let search_ttl_secs = parse_u64("HAVEN_SEARCH_TTL_SECS", "900")?;
    let inter_fetch_delay_ms = parse_u64("HAVEN_INTER_FETCH_DELAY_MS", "200")?;
    let sparse_result_threshold = parse_usize("HAVEN_SPARSE_RESULT_THRESHOLD", "5")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        geo_base_url,
        geo_timeout_secs,
        geo_user_agent,
        geo_max_retries,
        geo_retry_backoff_base_ms,
        category_ttl_secs,
        search_ttl_secs,
        inter_fetch_delay_ms,
        sparse_result_threshold,
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

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_DATABASE_URL: &str = "sqlite://stocksense.db?mode=rwc";
const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:3000,http://localhost:5000,http://127.0.0.1:5000,http://localhost:5001";

/// Marker left behind in `.env` templates; a key containing it was never filled in.
const PLACEHOLDER_MARKER: &str = "your_";

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
/// Every variable has a default, so only malformed values fail.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let credential = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && !v.contains(PLACEHOLDER_MARKER))
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
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

    let database_url = or_default("DATABASE_URL", DEFAULT_DATABASE_URL);
    let env = parse_environment(&or_default("STOCKSENSE_ENV", "development"));

    let bind_addr = parse("STOCKSENSE_BIND_ADDR", "0.0.0.0:5001")?;
    let log_level = or_default("STOCKSENSE_LOG_LEVEL", "info");
    let allowed_origins = parse_origins(&or_default("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS));

    let anthropic_api_key = credential("ANTHROPIC_API_KEY");
    let openai_api_key = credential("OPENAI_API_KEY");
    let news_api_key = credential("NEWS_API_KEY");
    let finnhub_api_key = credential("FINNHUB_API_KEY");

    let db_max_connections = parse_u32("STOCKSENSE_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("STOCKSENSE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("STOCKSENSE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let provider_request_timeout_secs = parse_u64("STOCKSENSE_PROVIDER_TIMEOUT_SECS", "10")?;
    let provider_user_agent = or_default("STOCKSENSE_PROVIDER_USER_AGENT", "StockAnalysisTool/1.0");

    let fanout_timeout_secs = parse_u64("STOCKSENSE_FANOUT_TIMEOUT_SECS", "5")?;
    let fanout_max_concurrent = parse_usize("STOCKSENSE_FANOUT_MAX_CONCURRENT", "2")?;
    if fanout_max_concurrent == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOCKSENSE_FANOUT_MAX_CONCURRENT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let generation_timeout_secs = parse_u64("STOCKSENSE_GENERATION_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        allowed_origins,
        anthropic_api_key,
        openai_api_key,
        news_api_key,
        finnhub_api_key,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        provider_request_timeout_secs,
        provider_user_agent,
        fanout_timeout_secs,
        fanout_max_concurrent,
        generation_timeout_secs,
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

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

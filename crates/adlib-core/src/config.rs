use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let base_url = require("ADLIB_BASE_URL")?;

    let log_level = or_default("ADLIB_LOG_LEVEL", "info");
    let output_dir = PathBuf::from(or_default("ADLIB_OUTPUT_DIR", "./data"));
    let default_region = or_default("ADLIB_DEFAULT_REGION", "GB");
    let default_pages = parse_u32("ADLIB_DEFAULT_PAGES", "1")?;
    let default_output_format = or_default("ADLIB_DEFAULT_OUTPUT_FORMAT", "json");

    let request_timeout_secs = parse_u64("ADLIB_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default(
        "ADLIB_USER_AGENT",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
    );
    let inter_request_delay_ms = parse_u64("ADLIB_INTER_REQUEST_DELAY_MS", "500")?;
    let max_retries = parse_u32("ADLIB_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("ADLIB_RETRY_BACKOFF_BASE_SECS", "5")?;

    Ok(AppConfig {
        base_url,
        log_level,
        output_dir,
        default_region,
        default_pages,
        default_output_format,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
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
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SHOPCAT_ENV", "development"))?;
    let log_level = or_default("SHOPCAT_LOG_LEVEL", "info");
    let stores_path = PathBuf::from(or_default("SHOPCAT_STORES_PATH", "./config/stores.yaml"));
    let output_dir = PathBuf::from(or_default("SHOPCAT_OUTPUT_DIR", "./data"));

    let scraper_request_timeout_secs = parse_u64("SHOPCAT_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default(
        "SHOPCAT_SCRAPER_USER_AGENT",
        "shopcat/0.1 (catalog-crawler)",
    );
    let scraper_page_size = parse_u32("SHOPCAT_SCRAPER_PAGE_SIZE", "250")?;
    if scraper_page_size == 0 || scraper_page_size > 250 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPCAT_SCRAPER_PAGE_SIZE".to_string(),
            reason: format!("{scraper_page_size} is outside 1..=250"),
        });
    }
    let scraper_inter_request_delay_ms =
        parse_u64("SHOPCAT_SCRAPER_INTER_REQUEST_DELAY_MS", "250")?;
    let scraper_max_retries = parse_u32("SHOPCAT_SCRAPER_MAX_RETRIES", "3")?;
    let scraper_retry_backoff_base_secs =
        parse_u64("SHOPCAT_SCRAPER_RETRY_BACKOFF_BASE_SECS", "5")?;
    let storefront_api_version = or_default("SHOPCAT_STOREFRONT_API_VERSION", "2024-01");
    let flush_every = parse_usize("SHOPCAT_FLUSH_EVERY", "50")?;

    Ok(AppConfig {
        env,
        log_level,
        stores_path,
        output_dir,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_page_size,
        scraper_inter_request_delay_ms,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
        storefront_api_version,
        flush_every,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPCAT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

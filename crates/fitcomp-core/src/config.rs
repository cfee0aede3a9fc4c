use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a recognized env var holds an invalid value.
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
/// Returns `ConfigError` if a recognized env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
///
/// No variable is required: absence of every provider credential yields an
/// aggregator with zero enabled providers, which is a valid (empty) deployment.
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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Blank credentials count as absent so `SERPAPI_KEY=` in a .env file
    // does not enable a provider with an empty key.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let env = parse_environment(&or_default("FITCOMP_ENV", "development"));
    let bind_addr = parse_addr("FITCOMP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("FITCOMP_LOG_LEVEL", "info");
    let user_agent = or_default("FITCOMP_USER_AGENT", "fitcomp/0.1 (price-comparison)");

    let serpapi_key = optional("SERPAPI_KEY");
    let scraperapi_key = optional("SCRAPERAPI_KEY");
    let catalogue_url = optional("FITCOMP_CATALOGUE_URL");

    let serp_timeout_secs = parse_u64("FITCOMP_SERP_TIMEOUT_SECS", "20")?;
    let scraper_timeout_secs = parse_u64("FITCOMP_SCRAPER_TIMEOUT_SECS", "30")?;
    let catalogue_timeout_secs = parse_u64("FITCOMP_CATALOGUE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        user_agent,
        serpapi_key,
        scraperapi_key,
        catalogue_url,
        serp_timeout_secs,
        scraper_timeout_secs,
        catalogue_timeout_secs,
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

use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_limit = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let value = parse_u32(var, default)?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("BIZSEARCH_ENV", "development"))?;
    let log_level = or_default("BIZSEARCH_LOG_LEVEL", "info");
    let graphql_url = or_default("BIZSEARCH_GRAPHQL_URL", "https://api.yelp.com/v3/graphql");
    let categories_url = or_default(
        "BIZSEARCH_CATEGORIES_URL",
        "https://api.yelp.com/v3/categories",
    );
    let api_key = lookup("BIZSEARCH_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let database_url = or_default("DATABASE_URL", "sqlite://bizsearch.db");

    let db_max_connections = parse_limit("BIZSEARCH_DB_MAX_CONNECTIONS", "4")?;
    let db_acquire_timeout_secs = parse_u64("BIZSEARCH_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    let request_timeout_secs = parse_u64("BIZSEARCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BIZSEARCH_USER_AGENT", "bizsearch/0.1 (business-search)");

    let search_limit = parse_limit("BIZSEARCH_SEARCH_LIMIT", "20")?;
    let page_size = parse_limit("BIZSEARCH_PAGE_SIZE", "20")?;
    let cat_search_limit = parse_limit("BIZSEARCH_CAT_SEARCH_LIMIT", "8")? as usize;

    Ok(AppConfig {
        env,
        log_level,
        graphql_url,
        categories_url,
        api_key,
        database_url,
        db_max_connections,
        db_acquire_timeout_secs,
        request_timeout_secs,
        user_agent,
        search_limit,
        page_size,
        cat_search_limit,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BIZSEARCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

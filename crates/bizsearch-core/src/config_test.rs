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

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BIZSEARCH_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");

    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.graphql_url, "https://api.yelp.com/v3/graphql");
    assert_eq!(cfg.categories_url, "https://api.yelp.com/v3/categories");
    assert!(cfg.api_key.is_none());
    assert_eq!(cfg.database_url, "sqlite://bizsearch.db");
    assert_eq!(cfg.db_max_connections, 4);
    assert_eq!(cfg.db_acquire_timeout_secs, 10);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "bizsearch/0.1 (business-search)");
    assert_eq!(cfg.search_limit, 20);
    assert_eq!(cfg.page_size, 20);
    assert_eq!(cfg.cat_search_limit, 8);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("BIZSEARCH_ENV", "test");
    map.insert("BIZSEARCH_API_KEY", "secret");
    map.insert("BIZSEARCH_GRAPHQL_URL", "http://localhost:9999/graphql");
    map.insert("BIZSEARCH_PAGE_SIZE", "10");
    map.insert("DATABASE_URL", "sqlite::memory:");

    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Test);
    assert_eq!(cfg.api_key.as_deref(), Some("secret"));
    assert_eq!(cfg.graphql_url, "http://localhost:9999/graphql");
    assert_eq!(cfg.page_size, 10);
    assert_eq!(cfg.database_url, "sqlite::memory:");
}

#[test]
fn blank_api_key_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("BIZSEARCH_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.api_key.is_none());
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("BIZSEARCH_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIZSEARCH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BIZSEARCH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_page_size() {
    let mut map = HashMap::new();
    map.insert("BIZSEARCH_PAGE_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIZSEARCH_PAGE_SIZE"),
        "expected InvalidEnvVar(BIZSEARCH_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("BIZSEARCH_API_KEY", "super-secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret-token"));
    assert!(rendered.contains("[redacted]"));
}

//! Application Configuration
//!
//! All tunables are read once at startup into an immutable [`AppConfig`] which is then
//! shared by reference (`Arc`) with the components that need it. Nothing in the crate
//! reads the environment after this point.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Connection settings for the movie metadata API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `https://api.themoviedb.org/3`.
    pub base_url: String,
    /// Bearer credential. When absent, requests go out without `Authorization`.
    pub api_key: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

/// Connection settings for the document database holding trend records.
#[derive(Debug, Clone)]
pub struct TrendStoreConfig {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// `None` selects the in-memory trend store.
    pub trend_store: Option<TrendStoreConfig>,
    pub bind_addr: SocketAddr,
    pub debounce: Duration,
    pub trending_limit: usize,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api = ApiConfig::new(
            &get("TMDB_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            get("TMDB_API_KEY"),
        );

        let bind_addr: SocketAddr = get("UI_BIND")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("UI_BIND is not a valid socket address")?;

        let debounce_ms = match get("SEARCH_DEBOUNCE_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SEARCH_DEBOUNCE_MS must be a number of milliseconds")?,
            None => DEFAULT_DEBOUNCE_MS,
        };

        let trending_limit = match get("TRENDING_LIMIT") {
            Some(raw) => raw
                .parse::<usize>()
                .context("TRENDING_LIMIT must be a positive integer")?,
            None => DEFAULT_TRENDING_LIMIT,
        };

        let trend_store = match get("APPWRITE_ENDPOINT") {
            Some(endpoint) => {
                let required = |key: &str| {
                    get(key).with_context(|| format!("{} is required when APPWRITE_ENDPOINT is set", key))
                };
                Some(TrendStoreConfig {
                    endpoint: endpoint.trim_end_matches('/').to_string(),
                    project_id: required("APPWRITE_PROJECT_ID")?,
                    database_id: required("APPWRITE_DATABASE_ID")?,
                    collection_id: required("APPWRITE_COLLECTION_ID")?,
                    api_key: get("APPWRITE_API_KEY"),
                })
            }
            None => None,
        };

        Ok(Self {
            api,
            trend_store,
            bind_addr,
            debounce: Duration::from_millis(debounce_ms),
            trending_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert!(config.api.api_key.is_none());
        assert!(config.trend_store.is_none());
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.trending_limit, 5);
    }

    #[test]
    fn test_trailing_slash_is_trimmed_from_base_url() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("TMDB_API_BASE_URL", "http://localhost:9000/3/"),
            ("TMDB_API_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:9000/3");
        assert_eq!(config.api.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = AppConfig::from_lookup(lookup_from(&[("TMDB_API_KEY", "   ")])).unwrap();
        assert!(config.api.api_key.is_none());
    }

    #[test]
    fn test_invalid_debounce_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[("SEARCH_DEBOUNCE_MS", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_document_store_requires_ids() {
        let result = AppConfig::from_lookup(lookup_from(&[(
            "APPWRITE_ENDPOINT",
            "https://cloud.appwrite.io/v1",
        )]));
        assert!(result.is_err());

        let config = AppConfig::from_lookup(lookup_from(&[
            ("APPWRITE_ENDPOINT", "https://cloud.appwrite.io/v1/"),
            ("APPWRITE_PROJECT_ID", "proj"),
            ("APPWRITE_DATABASE_ID", "db"),
            ("APPWRITE_COLLECTION_ID", "metrics"),
        ]))
        .unwrap();

        let store = config.trend_store.unwrap();
        assert_eq!(store.endpoint, "https://cloud.appwrite.io/v1");
        assert_eq!(store.collection_id, "metrics");
        assert!(store.api_key.is_none());
    }
}

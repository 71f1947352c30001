//! Configuration Module
//!
//! Loads server, upstream and cache settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_TTL_MS;

/// Default NewsAPI base URL
pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// NewsAPI credential appended to every upstream request
    pub api_key: String,
    /// Upstream base URL, without trailing slash
    pub news_api_base_url: String,
    /// Response cache TTL in milliseconds
    pub cache_ttl_ms: u64,
    /// Optional LRU bound on cached descriptors
    pub cache_max_entries: Option<usize>,
    /// Background expiry sweep interval in seconds, 0 disables it
    pub cache_sweep_interval: u64,
    /// Optional upstream request timeout
    pub upstream_timeout: Option<Duration>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_KEY` - NewsAPI credential (default: empty)
    /// - `NEWS_API_BASE_URL` - Upstream base URL (default: https://newsapi.org/v2)
    /// - `CACHE_TTL_MS` - Cache TTL in milliseconds (default: 600000)
    /// - `CACHE_MAX_ENTRIES` - LRU bound (default: unbounded)
    /// - `CACHE_SWEEP_INTERVAL_SECS` - Expiry sweep interval (default: 0, disabled)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream timeout (default: HTTP client default)
    /// - `PORT` - HTTP server port (default: 5000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("API_KEY").unwrap_or(defaults.api_key),
            news_api_base_url: env::var("NEWS_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.news_api_base_url),
            cache_ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.cache_ttl_ms),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES").filter(|n: &usize| *n > 0),
            cache_sweep_interval: parse_var("CACHE_SWEEP_INTERVAL_SECS")
                .unwrap_or(defaults.cache_sweep_interval),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT_SECS")
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs),
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            news_api_base_url: DEFAULT_NEWS_API_BASE_URL.to_string(),
            cache_ttl_ms: DEFAULT_TTL_MS,
            cache_max_entries: None,
            cache_sweep_interval: 0,
            upstream_timeout: None,
            server_port: 5000,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

//! Response DTOs for the news proxy API
//!
//! Every news endpoint answers with a [`NewsEnvelope`].

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

// == News Envelope ==
/// Standard response body relayed to the client.
#[derive(Debug, Clone, Serialize)]
pub struct NewsEnvelope {
    pub success: bool,
    pub message: String,
    /// Upstream payload, or `[]` when there is nothing to show
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl NewsEnvelope {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            error: None,
            meta: None,
        }
    }

    /// Unsuccessful envelope with empty data.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Value::Array(Vec::new()),
            error: None,
            meta: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_meta(mut self, meta: ResponseMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Extra diagnostics attached to fallback and failure responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_api_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_api_code: Option<String>,
}

impl ResponseMeta {
    /// Marks a response as served from cache.
    pub fn cached() -> Self {
        Self {
            cached: Some(true),
            ..Self::default()
        }
    }

    pub fn upstream(status: Option<u16>, code: Option<String>) -> Self {
        Self {
            cached: None,
            news_api_status: status,
            news_api_code: code,
        }
    }
}

/// Response body for the service index (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

impl IndexResponse {
    pub fn new() -> Self {
        let endpoints = BTreeMap::from([
            ("allNews", "/all-news"),
            ("topHeadlines", "/top-headlines"),
            ("countryNews", "/country/:iso"),
            ("availableKeywords", "/preferences/available"),
        ]);
        Self {
            message: "News API Server is running".to_string(),
            endpoints,
        }
    }
}

impl Default for IndexResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
    pub ttl_ms: u64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, ttl_ms: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            ttl_ms,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

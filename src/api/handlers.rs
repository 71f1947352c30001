//! API Handlers
//!
//! HTTP request handlers for each news proxy endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::cache::{CacheStore, SharedCache};
use crate::catalog::KeywordCatalog;
use crate::config::Config;
use crate::error::{Result, UpstreamError};
use crate::mediator::{FetchMediator, FetchOutcome};
use crate::models::{
    country_request, HeadlineParams, HealthResponse, IndexResponse, NewsEnvelope, PageParams,
    QueryParams, SearchParams, StatsResponse,
};
use crate::upstream::{HttpNewsUpstream, NewsUpstream};

/// Application state shared across all handlers.
///
/// The cache is owned here and handed to the mediator; handlers only read
/// it for statistics.
#[derive(Clone)]
pub struct AppState {
    pub cache: SharedCache,
    pub mediator: FetchMediator,
}

impl AppState {
    /// Creates a new AppState around a cache store and an upstream.
    pub fn new(
        cache: CacheStore,
        upstream: Arc<dyn NewsUpstream>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let cache: SharedCache = Arc::new(RwLock::new(cache));
        let mediator = FetchMediator::new(cache.clone(), upstream, base_url, api_key);
        Self { cache, mediator }
    }

    /// Creates a new AppState from configuration, talking to NewsAPI over HTTP.
    pub fn from_config(config: &Config) -> std::result::Result<Self, UpstreamError> {
        let mut cache = CacheStore::new(config.cache_ttl_ms);
        if let Some(limit) = config.cache_max_entries {
            cache = cache.with_capacity_limit(limit);
        }

        let upstream = match config.upstream_timeout {
            Some(timeout) => HttpNewsUpstream::with_timeout(timeout)?,
            None => HttpNewsUpstream::new(),
        };

        Ok(Self::new(
            cache,
            Arc::new(upstream),
            config.news_api_base_url.clone(),
            config.api_key.clone(),
        ))
    }
}

/// Handler for GET /all-news
pub async fn all_news_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> FetchOutcome {
    let query = QueryParams::parse(query.as_deref());
    let request = SearchParams::from_query(&query).into_request();
    state.mediator.fetch(&request).await
}

/// Handler for GET /top-headlines
pub async fn top_headlines_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<FetchOutcome> {
    let query = QueryParams::parse(query.as_deref());
    let request = HeadlineParams::from_query(&query).into_request()?;
    Ok(state.mediator.fetch(&request).await)
}

/// Handler for GET /country/:iso
pub async fn country_news_handler(
    State(state): State<AppState>,
    Path(iso): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<FetchOutcome> {
    let paging = PageParams::from_query(&QueryParams::parse(query.as_deref()));
    let request = country_request(&iso, &paging)?;
    info!("Fetching news for country: {}", iso.to_ascii_lowercase());
    Ok(state.mediator.fetch(&request).await)
}

/// Handler for GET /preferences/available
pub async fn available_keywords_handler() -> Json<NewsEnvelope> {
    let catalog = serde_json::to_value(KeywordCatalog::new()).unwrap_or(Value::Null);
    Json(NewsEnvelope::success("Available keywords", catalog))
}

/// Handler for GET /
pub async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse::new())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats(), cache.ttl_ms()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

//! Fetch Mediator
//!
//! Resolves a news request to its descriptor, always calls the upstream,
//! and uses the response cache only as a fallback while the provider is
//! throttling us.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::SharedCache;
use crate::error::UpstreamError;
use crate::models::{NewsEnvelope, ResponseMeta};
use crate::upstream::{Descriptor, NewsRequest, NewsUpstream};

pub const MSG_FETCHED: &str = "Successfully fetched the data";
pub const MSG_NO_RESULTS: &str = "No more results to show";
pub const MSG_SERVING_CACHED: &str = "Rate limited by NewsAPI. Serving cached results.";
pub const MSG_RATE_LIMITED: &str =
    "NewsAPI rate limit reached. Please try later or use a new API key.";
pub const MSG_FAILED: &str = "Failed to fetch data from the API";

// == Fetch Outcome ==
/// Terminal state of one mediated request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Upstream returned at least one result
    Fresh(Value),
    /// Upstream succeeded with zero results
    Empty,
    /// Upstream throttled us; a cached payload is served instead
    StaleFallback(Value),
    /// Upstream throttled us and nothing was cached
    RateLimited(UpstreamError),
    /// Any other upstream failure
    Failed(UpstreamError),
}

impl FetchOutcome {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FetchOutcome::Fresh(_) | FetchOutcome::StaleFallback(_) => StatusCode::OK,
            FetchOutcome::Empty => StatusCode::NOT_FOUND,
            FetchOutcome::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            FetchOutcome::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_envelope(self) -> NewsEnvelope {
        match self {
            FetchOutcome::Fresh(payload) => NewsEnvelope::success(MSG_FETCHED, payload),
            FetchOutcome::Empty => NewsEnvelope::failure(MSG_NO_RESULTS),
            FetchOutcome::StaleFallback(payload) => {
                NewsEnvelope::success(MSG_SERVING_CACHED, payload).with_meta(ResponseMeta::cached())
            }
            FetchOutcome::RateLimited(error) => upstream_failure(MSG_RATE_LIMITED, &error),
            FetchOutcome::Failed(error) => upstream_failure(MSG_FAILED, &error),
        }
    }
}

fn upstream_failure(message: &str, error: &UpstreamError) -> NewsEnvelope {
    NewsEnvelope::failure(message)
        .with_error(error.to_string())
        .with_meta(ResponseMeta::upstream(
            error.http_status(),
            error.code().map(str::to_string),
        ))
}

impl IntoResponse for FetchOutcome {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.into_envelope())).into_response()
    }
}

// == Fetch Mediator ==
/// Orchestrates lookup, upstream call, cache update and fallback.
#[derive(Clone)]
pub struct FetchMediator {
    cache: SharedCache,
    upstream: Arc<dyn NewsUpstream>,
    base_url: String,
    api_key: String,
}

impl FetchMediator {
    pub fn new(
        cache: SharedCache,
        upstream: Arc<dyn NewsUpstream>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            upstream,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Cache key and upstream URL for `request`.
    pub fn descriptor(&self, request: &NewsRequest) -> Descriptor {
        Descriptor::resolve(&self.base_url, &self.api_key, request)
    }

    // == Fetch ==
    /// Runs one request through the protocol.
    ///
    /// The cache lookup happens first but never replaces the upstream call;
    /// its result is only used if the upstream reports rate limiting. The
    /// cache lock is not held while the upstream call is in flight.
    pub async fn fetch(&self, request: &NewsRequest) -> FetchOutcome {
        let descriptor = self.descriptor(request);
        let key = descriptor.as_str();

        let cached = self.cache.write().await.get(key);
        debug!(
            kind = request.query.kind(),
            cached = cached.is_some(),
            "Fetching {}",
            descriptor
        );

        match self.upstream.fetch(key).await {
            Ok(payload) => {
                let has_results = total_results(&payload) > 0.0;
                self.cache.write().await.put(key, payload.clone());

                if has_results {
                    FetchOutcome::Fresh(payload)
                } else {
                    debug!("No results for {}", descriptor);
                    FetchOutcome::Empty
                }
            }
            Err(error) => {
                warn!(
                    status = ?error.http_status(),
                    code = ?error.code(),
                    "NewsAPI error for {}: {}",
                    descriptor,
                    error
                );

                match (error.is_rate_limited(), cached) {
                    (true, Some(payload)) => {
                        info!("Serving cached payload for {}", descriptor);
                        FetchOutcome::StaleFallback(payload)
                    }
                    (true, None) => FetchOutcome::RateLimited(error),
                    (false, _) => FetchOutcome::Failed(error),
                }
            }
        }
    }
}

/// Reads `totalResults`; a missing or non-numeric count counts as zero.
fn total_results(payload: &Value) -> f64 {
    payload
        .get("totalResults")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::upstream::{Category, CountryCode};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::RwLock;

    /// Replays scripted results and records requested URLs.
    #[derive(Default)]
    struct ScriptedUpstream {
        replies: Mutex<VecDeque<Result<Value, UpstreamError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedUpstream {
        fn reply(self, reply: Result<Value, UpstreamError>) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NewsUpstream for ScriptedUpstream {
        async fn fetch(&self, url: &str) -> Result<Value, UpstreamError> {
            self.calls.lock().unwrap().push(url.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(UpstreamError::Transport("no scripted reply".into())))
        }
    }

    fn articles(n: usize) -> Value {
        let items: Vec<Value> = (0..n)
            .map(|i| json!({ "title": format!("Story {}", i), "source": { "name": "Wire" } }))
            .collect();
        json!({ "status": "ok", "totalResults": n, "articles": items })
    }

    fn rate_limited() -> UpstreamError {
        UpstreamError::status(429, Some("rateLimited".to_string()), "Too many requests")
    }

    fn setup(ttl_ms: u64, upstream: ScriptedUpstream) -> (FetchMediator, SharedCache, Arc<ScriptedUpstream>) {
        let cache: SharedCache = Arc::new(RwLock::new(CacheStore::new(ttl_ms)));
        let upstream = Arc::new(upstream);
        let mediator = FetchMediator::new(cache.clone(), upstream.clone(), "http://news.test/v2", "k");
        (mediator, cache, upstream)
    }

    fn us_request() -> NewsRequest {
        NewsRequest::country("us".parse::<CountryCode>().unwrap()).with_page_size(20)
    }

    #[tokio::test]
    async fn test_success_populates_cache() {
        let (mediator, cache, upstream) = setup(60_000, ScriptedUpstream::default().reply(Ok(articles(15))));
        let request = us_request();

        let outcome = mediator.fetch(&request).await;

        assert_eq!(outcome, FetchOutcome::Fresh(articles(15)));
        assert_eq!(outcome.status_code(), StatusCode::OK);
        let key = mediator.descriptor(&request);
        assert_eq!(
            key.as_str(),
            "http://news.test/v2/top-headlines?country=us&pageSize=20&page=1&apiKey=k"
        );
        assert_eq!(upstream.calls(), vec![key.as_str().to_string()]);
        assert_eq!(cache.write().await.get(key.as_str()), Some(articles(15)));
    }

    #[tokio::test]
    async fn test_fresh_cache_does_not_skip_upstream() {
        let upstream = ScriptedUpstream::default()
            .reply(Ok(articles(2)))
            .reply(Ok(articles(3)));
        let (mediator, cache, upstream) = setup(60_000, upstream);
        let request = NewsRequest::category(Category::Health);

        mediator.fetch(&request).await;
        let second = mediator.fetch(&request).await;

        assert_eq!(upstream.calls().len(), 2);
        assert_eq!(second, FetchOutcome::Fresh(articles(3)));
        let key = mediator.descriptor(&request);
        assert_eq!(cache.write().await.get(key.as_str()), Some(articles(3)));
    }

    #[tokio::test]
    async fn test_rate_limited_serves_cached_payload() {
        let upstream = ScriptedUpstream::default()
            .reply(Ok(articles(15)))
            .reply(Err(rate_limited()));
        let (mediator, _cache, _upstream) = setup(60_000, upstream);
        let request = us_request();

        mediator.fetch(&request).await;
        let outcome = mediator.fetch(&request).await;

        assert_eq!(outcome, FetchOutcome::StaleFallback(articles(15)));
        let envelope = serde_json::to_value(outcome.into_envelope()).unwrap();
        assert_eq!(envelope["success"], true);
        assert_eq!(envelope["meta"]["cached"], true);
        assert_eq!(envelope["data"]["totalResults"], 15);
    }

    #[tokio::test]
    async fn test_rate_limited_after_ttl_returns_429() {
        let upstream = ScriptedUpstream::default()
            .reply(Ok(articles(5)))
            .reply(Err(rate_limited()));
        let (mediator, cache, _upstream) = setup(40, upstream);
        let request = NewsRequest::search("election");

        mediator.fetch(&request).await;
        tokio::time::sleep(Duration::from_millis(80)).await;
        let outcome = mediator.fetch(&request).await;

        assert_eq!(outcome.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert!(matches!(outcome, FetchOutcome::RateLimited(_)));
        assert!(cache.read().await.is_empty(), "Expired entry is evicted on lookup");
    }

    #[tokio::test]
    async fn test_rate_limited_by_code_without_429() {
        let err = UpstreamError::status(426, Some("rateLimited".to_string()), "Slow down");
        let (mediator, _cache, _upstream) = setup(60_000, ScriptedUpstream::default().reply(Err(err)));

        let outcome = mediator.fetch(&us_request()).await;

        assert_eq!(outcome.status_code(), StatusCode::TOO_MANY_REQUESTS);
        let envelope = serde_json::to_value(outcome.into_envelope()).unwrap();
        assert_eq!(envelope["success"], false);
        assert_eq!(envelope["message"], MSG_RATE_LIMITED);
        assert_eq!(envelope["meta"]["newsApiStatus"], 426);
        assert_eq!(envelope["meta"]["newsApiCode"], "rateLimited");
    }

    #[tokio::test]
    async fn test_other_failure_ignores_cache() {
        let err = UpstreamError::status(401, Some("apiKeyInvalid".to_string()), "Your API key is invalid");
        let upstream = ScriptedUpstream::default()
            .reply(Ok(articles(4)))
            .reply(Err(err));
        let (mediator, _cache, _upstream) = setup(60_000, upstream);
        let request = us_request();

        mediator.fetch(&request).await;
        let outcome = mediator.fetch(&request).await;

        assert_eq!(outcome.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = serde_json::to_value(outcome.into_envelope()).unwrap();
        assert_eq!(envelope["success"], false);
        assert_eq!(envelope["message"], MSG_FAILED);
        assert_eq!(envelope["error"], "Your API key is invalid");
        assert_eq!(envelope["meta"]["newsApiStatus"], 401);
        assert_eq!(envelope["meta"]["newsApiCode"], "apiKeyInvalid");
        assert!(envelope["meta"].get("cached").is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_omits_upstream_fields() {
        let err = UpstreamError::Transport("connection refused".to_string());
        let (mediator, _cache, _upstream) = setup(60_000, ScriptedUpstream::default().reply(Err(err)));

        let outcome = mediator.fetch(&us_request()).await;

        let envelope = serde_json::to_value(outcome.into_envelope()).unwrap();
        assert_eq!(envelope["error"], "connection refused");
        assert_eq!(envelope["meta"], json!({}));
    }

    #[tokio::test]
    async fn test_empty_result_is_still_cached() {
        let (mediator, cache, _upstream) = setup(60_000, ScriptedUpstream::default().reply(Ok(articles(0))));
        let request = NewsRequest::search("election");

        let outcome = mediator.fetch(&request).await;

        assert_eq!(outcome, FetchOutcome::Empty);
        assert_eq!(outcome.status_code(), StatusCode::NOT_FOUND);
        let envelope = serde_json::to_value(outcome.into_envelope()).unwrap();
        assert_eq!(envelope["success"], false);
        assert_eq!(envelope["message"], MSG_NO_RESULTS);
        assert_eq!(envelope["data"], json!([]));

        let key = mediator.descriptor(&request);
        assert_eq!(cache.write().await.get(key.as_str()), Some(articles(0)));
    }

    #[tokio::test]
    async fn test_missing_total_counts_as_empty() {
        let payload = json!({ "status": "ok", "articles": [] });
        let (mediator, _cache, _upstream) = setup(60_000, ScriptedUpstream::default().reply(Ok(payload)));

        let outcome = mediator.fetch(&NewsRequest::search("news")).await;
        assert_eq!(outcome, FetchOutcome::Empty);
    }

    #[tokio::test]
    async fn test_failure_does_not_touch_cache() {
        let (mediator, cache, _upstream) = setup(60_000, ScriptedUpstream::default().reply(Err(rate_limited())));

        mediator.fetch(&us_request()).await;

        assert!(cache.read().await.is_empty());
    }
}

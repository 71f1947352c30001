//! API Routes
//!
//! Configures the Axum router with all news proxy endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    all_news_handler, available_keywords_handler, country_news_handler, health_handler,
    index_handler, stats_handler, top_headlines_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Service index
/// - `GET /all-news` - Keyword search
/// - `GET /top-headlines` - Headlines by category
/// - `GET /country/:iso` - Headlines by country
/// - `GET /preferences/available` - Keyword catalog
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, also answering preflight requests
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/all-news", get(all_news_handler))
        .route("/top-headlines", get(top_headlines_handler))
        .route("/country/:iso", get(country_news_handler))
        .route("/preferences/available", get(available_keywords_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::error::UpstreamError;
    use crate::upstream::NewsUpstream;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct UnreachableUpstream;

    #[async_trait]
    impl NewsUpstream for UnreachableUpstream {
        async fn fetch(&self, _url: &str) -> Result<Value, UpstreamError> {
            Err(UpstreamError::Transport("unreachable".to_string()))
        }
    }

    fn create_test_app() -> Router {
        let state = AppState::new(
            CacheStore::new(60_000),
            Arc::new(UnreachableUpstream),
            "http://news.test/v2",
            "k",
        );
        create_router(state)
    }

    async fn status_of(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_index_endpoint() {
        assert_eq!(status_of("/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(status_of("/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_500() {
        assert_eq!(status_of("/all-news").await, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_bad_country_is_400() {
        assert_eq!(status_of("/country/usa").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preflight_is_answered() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/top-headlines")
                    .header("origin", "http://localhost:5173")
                    .header("access-control-request-method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}

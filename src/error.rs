//! Error types for the news proxy
//!
//! `UpstreamError` describes a failed call to the news provider;
//! `ApiError` covers requests rejected before any upstream call is made.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::NewsEnvelope;

/// NewsAPI error code signalling throttling
pub const RATE_LIMITED_CODE: &str = "rateLimited";

// == Upstream Error ==
/// A failed upstream news request.
///
/// Only the provider's `status`/`code`/`message` fields are kept; the raw
/// body is never relayed to clients.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// Provider answered with a non-success HTTP status
    #[error("{message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Request could not be sent or the response could not be read
    #[error("{0}")]
    Transport(String),

    /// Success status with a body that is not valid JSON
    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}

impl UpstreamError {
    pub fn status(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            code,
            message: message.into(),
        }
    }

    /// HTTP status returned by the provider, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Provider error code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Status { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Throttled either by HTTP 429 or by the provider's own code.
    pub fn is_rate_limited(&self) -> bool {
        self.http_status() == Some(StatusCode::TOO_MANY_REQUESTS.as_u16())
            || self.code() == Some(RATE_LIMITED_CODE)
    }
}

// == API Error ==
/// Errors raised by the HTTP layer itself.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(NewsEnvelope::failure(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, ApiError>;

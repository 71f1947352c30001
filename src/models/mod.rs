//! Request and Response models for the news proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

pub use requests::{country_request, HeadlineParams, PageParams, QueryParams, SearchParams};
pub use responses::{HealthResponse, IndexResponse, NewsEnvelope, ResponseMeta, StatsResponse};

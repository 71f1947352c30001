//! News Proxy - a thin backend in front of NewsAPI
//!
//! Forwards search, category and country requests to the provider and keeps
//! the last good response per request so clients still get articles while
//! the provider is rate limiting.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod mediator;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use mediator::{FetchMediator, FetchOutcome};
pub use tasks::spawn_cleanup_task;

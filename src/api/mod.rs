//! API Module
//!
//! HTTP handlers and routing for the news proxy.
//!
//! # Endpoints
//! - `GET /all-news` - Keyword search
//! - `GET /top-headlines` - Headlines by category
//! - `GET /country/:iso` - Headlines by country
//! - `GET /preferences/available` - Keyword catalog
//! - `GET /`, `/stats`, `/health` - Service information

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

//! Upstream Module
//!
//! Descriptor construction and the outbound client for the news provider.

mod client;
mod descriptor;

pub use client::{HttpNewsUpstream, NewsUpstream};
pub use descriptor::{
    Category, CountryCode, Descriptor, NewsQuery, NewsRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
    DEFAULT_QUERY,
};

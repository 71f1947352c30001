//! Cache Entry Module
//!
//! A stored upstream payload together with the moment it was fetched.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// The last successful upstream payload for one descriptor.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Upstream response body, kept opaque
    pub payload: Value,
    /// Fetch timestamp (Unix milliseconds)
    pub fetched_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            fetched_at: current_timestamp_ms(),
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the payload was fetched.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.fetched_at)
    }

    // == Is Expired ==
    /// Checks the entry against a TTL.
    ///
    /// An entry stays servable while `now - fetched_at <= ttl_ms`, so it only
    /// expires once the age strictly exceeds the TTL.
    pub fn is_expired(&self, ttl_ms: u64) -> bool {
        self.age_ms() > ttl_ms
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

//! Cache Module
//!
//! In-memory response cache keyed by upstream descriptor. Entries expire
//! lazily on read; an LRU bound can be switched on by configuration.

mod entry;
mod lru;
mod stats;
mod store;


pub use entry::{current_timestamp_ms, CacheEntry};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Shared handle to the process-wide response cache.
pub type SharedCache = std::sync::Arc<tokio::sync::RwLock<CacheStore>>;

/// Default TTL: ten minutes.
pub const DEFAULT_TTL_MS: u64 = 10 * 60 * 1000;

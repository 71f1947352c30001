//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: drops expired cache entries at a configured interval
//!   (disabled unless `CACHE_SWEEP_INTERVAL_SECS` is set)

mod cleanup;

pub use cleanup::spawn_cleanup_task;

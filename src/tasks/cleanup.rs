//! Expiry Sweep Task
//!
//! Optional background task that drops cache entries past their TTL, so
//! descriptors that are never requested again do not stay in memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns the sweeper, or returns `None` when `interval_secs` is 0.
///
/// The returned handle should be aborted on shutdown.
pub fn spawn_cleanup_task(cache: SharedCache, interval_secs: u64) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        return None;
    }
    Some(spawn_sweeper(cache, Duration::from_secs(interval_secs)))
}

fn spawn_sweeper(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache expiry sweep every {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();
            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}

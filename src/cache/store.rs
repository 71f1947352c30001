//! Cache Store Module
//!
//! Response cache keyed by upstream descriptor, with lazy TTL expiry and an
//! optional LRU capacity bound.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Maps descriptors to the last successful upstream payload.
///
/// Expiry is checked on read: an entry older than the TTL is removed the
/// moment it is looked up. Without a capacity the store grows with the
/// number of distinct descriptors seen.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    /// Maximum age in milliseconds before an entry is treated as absent
    ttl_ms: u64,
    /// Optional entry bound; `None` means unbounded
    max_entries: Option<usize>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an unbounded store with the given TTL in milliseconds.
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            ttl_ms,
            max_entries: None,
        }
    }

    /// Bounds the store to `max_entries`, evicting least recently used
    /// descriptors once full. A bound of zero is ignored.
    pub fn with_capacity_limit(mut self, max_entries: usize) -> Self {
        self.max_entries = (max_entries > 0).then_some(max_entries);
        self
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    // == Get ==
    /// Returns the payload for `key` if present and within TTL.
    ///
    /// An expired entry is deleted before `None` is returned.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(self.ttl_ms),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.payload.clone())
    }

    // == Put ==
    /// Inserts or overwrites the payload for `key`, stamped with the current
    /// time.
    pub fn put(&mut self, key: impl Into<String>, payload: Value) {
        let key = key.into();

        if let Some(limit) = self.max_entries {
            if !self.entries.contains_key(&key) && self.entries.len() >= limit {
                if let Some(oldest) = self.lru.evict_oldest() {
                    self.entries.remove(&oldest);
                    self.stats.record_eviction();
                }
            }
        }

        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(payload));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Drops every entry past its TTL. Returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let ttl_ms = self.ttl_ms;
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }
        self.stats.record_expirations(expired.len());
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
    }
}

//! Process-wide TTL cache for decoded upstream responses.

use dashmap::DashMap;
use serde_json::Value;
use std::time::{Duration, Instant};

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// Keyed store of decoded JSON payloads with per-entry expiry.
///
/// Entries are written whole after a successful decode, so concurrent
/// readers observe either a complete payload or a miss. Expired entries
/// are evicted lazily on the next read of their key.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Look up an unexpired entry, cloning the stored payload.
    pub fn get(&self, key: &str) -> Option<Value> {
        let hit = match self.entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => None,
            None => return None,
        };
        if hit.is_none() {
            self.entries.remove(key);
        }
        hit
    }

    /// Store a payload under `key`, resetting the TTL if the key already
    /// exists.
    pub fn insert(&self, key: &str, value: Value) {
        self.entries.insert(
            key.to_owned(),
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }
}

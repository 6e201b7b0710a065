//! In-memory TTL cache for response bodies
//!
//! Keyed by logical endpoint identity. Eviction is lazy: an expired entry
//! is dropped the next time `get` touches it. There is no size bound; the
//! population is bounded by the number of distinct endpoints in use.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::trace;

/// Default time-to-live for cached responses: 5 minutes
pub const DEFAULT_TTL_SECS: i64 = 300;

/// Default TTL as a [`Duration`]
pub fn default_ttl() -> Duration {
    Duration::seconds(DEFAULT_TTL_SECS)
}

/// A cached response body with its absolute expiry
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// TTL response cache
///
/// Explicitly constructed and injected by the composition root; there is
/// no global instance.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, expiring `ttl` from now.
    ///
    /// `None` uses the default TTL. A second `set` on the same key
    /// overwrites the prior entry and its expiry.
    pub fn set(&self, key: &str, value: Value, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or_else(default_ttl);
        let entry = CacheEntry {
            value,
            expires_at: Utc::now() + ttl,
        };

        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(key.to_string(), entry);
    }

    /// Return the cached value if present and unexpired.
    ///
    /// An expired entry is evicted as a side effect and reported as a miss.
    pub fn get(&self, key: &str) -> Option<Value> {
        let now = Utc::now();
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                trace!("Cache entry {} expired, evicting", key);
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Freshness check without mutating the cache
    pub fn has(&self, key: &str) -> bool {
        let now = Utc::now();
        let entries = self.entries.lock().expect("cache lock poisoned");
        entries.get(key).is_some_and(|e| !e.is_expired(now))
    }

    /// Drop a single key. No-op when absent.
    pub fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.remove(key);
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.clear();
    }
}

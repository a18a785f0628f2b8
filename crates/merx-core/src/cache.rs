//! # Cache Store
//!
//! Cache contract consumed by the cache aspects, plus the in-memory
//! implementation shared across requests.
//!
//! ## Keying Scheme
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  key    = "ProductService.get_list_by_category:[\"<uuid>\"]"        │
//! │           └── method identity ──┘└── serialized arguments ──┘       │
//! │                                                                     │
//! │  prefix = "ProductService.get"                                      │
//! │           mutating operations invalidate every read-operation       │
//! │           entry under their prefix (coarse, not entry-level)        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is the only shared mutable resource in the core and must stay
//! consistent under concurrent read/insert/invalidate from simultaneous
//! requests sharing one service instance.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use serde_json::Value;

/// Cache collaborator contract consumed by the cache aspects.
pub trait CacheStore: Send + Sync {
    /// Returns the live value under `key`, or `None` on miss or expiry.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key` for `ttl` (seconds resolution is enough).
    fn set(&self, key: &str, value: Value, ttl: Duration);

    /// Removes every entry whose key starts with `prefix`.
    fn remove_by_prefix(&self, prefix: &str);
}

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Lock-protected in-memory cache.
///
/// Expired entries are dropped lazily: reads treat them as misses and
/// writes sweep them out, so the map does not grow unbounded under a
/// steady read/write mix.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        MemoryCache::default()
    }
}

// A poisoned lock means a panic happened while a guard was held; the map
// itself is still structurally sound, so we keep serving it.
fn read_entries(
    lock: &RwLock<HashMap<String, CacheEntry>>,
) -> std::sync::RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_entries(
    lock: &RwLock<HashMap<String, CacheEntry>>,
) -> std::sync::RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        let entries = read_entries(&self.entries);
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        let now = Instant::now();
        let mut entries = write_entries(&self.entries);
        entries.retain(|_, entry| !entry.is_expired(now));
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: now + ttl,
            },
        );
    }

    fn remove_by_prefix(&self, prefix: &str) {
        let mut entries = write_entries(&self.entries);
        entries.retain(|key, _| !key.starts_with(prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_returns_live_entry() {
        let cache = MemoryCache::new();
        cache.set("svc.get:[1]", json!({"n": 1}), Duration::from_secs(60));
        assert_eq!(cache.get("svc.get:[1]"), Some(json!({"n": 1})));
    }

    #[test]
    fn test_miss_on_unknown_key() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("svc.get:[1]"), None);
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache = MemoryCache::new();
        cache.set("svc.get:[1]", json!(1), Duration::ZERO);
        assert_eq!(cache.get("svc.get:[1]"), None);
    }

    #[test]
    fn test_remove_by_prefix_clears_matching_entries_only() {
        let cache = MemoryCache::new();
        cache.set("svc.get_list:[]", json!(1), Duration::from_secs(60));
        cache.set("svc.get_by_id:[2]", json!(2), Duration::from_secs(60));
        cache.set("other.get:[]", json!(3), Duration::from_secs(60));

        cache.remove_by_prefix("svc.get");

        assert_eq!(cache.get("svc.get_list:[]"), None);
        assert_eq!(cache.get("svc.get_by_id:[2]"), None);
        assert_eq!(cache.get("other.get:[]"), Some(json!(3)));
    }

    #[test]
    fn test_set_overwrites_existing_key() {
        let cache = MemoryCache::new();
        cache.set("k", json!(1), Duration::from_secs(60));
        cache.set("k", json!(2), Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(json!(2)));
    }
}

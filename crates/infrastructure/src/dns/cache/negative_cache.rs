use super::key::CacheKey;
use dashmap::DashMap;
use dns_pin_application::ports::NegativeCachePort;
use dns_pin_domain::RecordType;
use rustc_hash::FxBuildHasher;
use std::time::{Duration, Instant};
use tracing::debug;

/// Sweeps at most this many expired entries per insert at capacity.
const EXPIRED_SWEEP_BATCH: usize = 64;

struct NegativeEntry {
    expires_at: Instant,
}

/// Process-wide memory of `(name, type)` pairs known to have no records.
///
/// Entries expire after the TTL given at insertion. Once `max_entries` is
/// reached an insert first drops expired entries, then an arbitrary live one.
pub struct NegativeDnsCache {
    cache: DashMap<CacheKey, NegativeEntry, FxBuildHasher>,
    max_entries: usize,
}

impl NegativeDnsCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            cache: DashMap::with_capacity_and_hasher(max_entries.min(65536), FxBuildHasher),
            max_entries,
        }
    }

    /// Remaining lifetime, or `None` when absent or expired.
    pub fn get(&self, domain: &str, record_type: &RecordType) -> Option<Duration> {
        let key = CacheKey::new(domain, *record_type);
        let now = Instant::now();
        match self.cache.entry(key) {
            dashmap::Entry::Vacant(_) => None,
            dashmap::Entry::Occupied(e) => {
                let expires_at = e.get().expires_at;
                if now >= expires_at {
                    e.remove();
                    None
                } else {
                    Some(expires_at - now)
                }
            }
        }
    }

    pub fn insert(&self, domain: &str, record_type: RecordType, ttl: u32) {
        if self.cache.len() >= self.max_entries {
            self.make_room();
        }
        let expires_at = Instant::now() + Duration::from_secs(u64::from(ttl));
        let key = CacheKey::new(domain, record_type);
        self.cache.insert(key, NegativeEntry { expires_at });
    }

    fn make_room(&self) {
        let now = Instant::now();
        let expired: Vec<CacheKey> = self
            .cache
            .iter()
            .filter(|e| now >= e.value().expires_at)
            .map(|e| e.key().clone())
            .take(EXPIRED_SWEEP_BATCH)
            .collect();
        for k in &expired {
            self.cache.remove(k);
        }
        if self.cache.len() >= self.max_entries {
            if let Some(k) = self.cache.iter().map(|e| e.key().clone()).next() {
                self.cache.remove(&k);
            }
        }
    }

    pub fn remove(&self, domain: &str, record_type: &RecordType) {
        let key = CacheKey::new(domain, *record_type);
        self.cache.remove(&key);
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.cache.len();
        self.cache.retain(|_, entry| now < entry.expires_at);
        let removed = before.saturating_sub(self.cache.len());
        if removed > 0 {
            debug!(removed, remaining = self.cache.len(), "Purged expired negative entries");
        }
        removed
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl NegativeCachePort for NegativeDnsCache {
    fn is_negative_cached(&self, name: &str, record_type: RecordType) -> bool {
        self.get(name, &record_type).is_some()
    }

    fn set_negative_cache(&self, name: &str, record_type: RecordType, ttl_secs: u32) {
        self.insert(name, record_type, ttl_secs);
    }
}

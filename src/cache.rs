//! Read-time memoization cache.
//!
//! Read-time estimates are recomputed on every render of a listing page, so
//! the estimator keeps a small bounded cache of results. The cache is a plain
//! value owned by the estimator (no process-wide singleton), which keeps
//! tests isolated and lets callers size it from config.
//!
//! # Keys
//!
//! Keys are chosen by the caller: the first 100 characters of a raw markdown
//! string, or the document id for a parsed document. Two raw inputs sharing
//! a 100-character prefix therefore share an entry.
//!
//! # Eviction
//!
//! - **Capacity**: least-recently-used entries are evicted once the cache
//!   holds `capacity` entries (default 100).
//! - **TTL**: an entry older than `ttl` (default one hour) is treated as a
//!   miss and dropped on lookup.
//!
//! Concurrent access is serialized by a `Mutex`. Values are plain minute
//! counts, so two threads racing to fill the same key write the same value.

use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Bounded LRU cache of read-time results with per-entry expiry.
#[derive(Debug)]
pub struct ReadTimeCache {
    entries: Mutex<LruCache<String, (u32, Instant)>>,
    ttl: Duration,
    stats: Mutex<CacheStats>,
}

impl Default for ReadTimeCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

impl ReadTimeCache {
    /// A capacity of zero is bumped to one.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// Cached value for `key`, if present and not expired.
    pub fn get(&self, key: &str) -> Option<u32> {
        let hit = {
            let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            match entries.get(key) {
                Some(&(minutes, stored)) if stored.elapsed() < self.ttl => Some(minutes),
                Some(_) => {
                    entries.pop(key);
                    None
                }
                None => None,
            }
        };
        let mut stats = self.stats.lock().unwrap_or_else(|e| e.into_inner());
        match hit {
            Some(_) => stats.hit(),
            None => stats.miss(),
        }
        hit
    }

    pub fn insert(&self, key: String, minutes: u32) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.put(key, (minutes, Instant::now()));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    pub fn stats(&self) -> CacheStats {
        *self.stats.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Lookup counters for a cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} computed ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} computed", self.misses)
        }
    }
}

//! Profile-existence cache.
//!
//! Maps a uid to whether that user has a stored profile, so route gating
//! does not hit the data service on every navigation.
//!
//! ```text
//!   AuthStore ──get/put──▶ ProfileCache ──▶ LruCache<uid, bool>
//!       │                       ▲
//!       └── uid changed ── clear┘        onboarding ── invalidate(uid)
//! ```
//!
//! All state sits behind a `tokio::sync::Mutex`; `LruCache::get` reorders
//! entries, so even lookups need exclusive access.

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Default number of cached uids.
pub const DEFAULT_PROFILE_CACHE_CAPACITY: usize = 64;

// ============================================================================
// CacheStats
// ============================================================================

/// Counters for cache effectiveness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    pub clears: u64,
    pub current_size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate in `[0, 1]`; 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// ============================================================================
// ProfileCache
// ============================================================================

struct Inner {
    entries: LruCache<String, bool>,
    stats: CacheStats,
}

/// Bounded uid → has-profile cache.
pub struct ProfileCache {
    inner: Mutex<Inner>,
}

impl ProfileCache {
    /// A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                stats: CacheStats {
                    capacity: capacity.get(),
                    ..Default::default()
                },
            }),
        }
    }

    pub async fn get(&self, uid: &str) -> Option<bool> {
        let mut inner = self.inner.lock().await;
        let found = inner.entries.get(uid).copied();
        if found.is_some() {
            inner.stats.hits += 1;
        } else {
            inner.stats.misses += 1;
        }
        found
    }

    pub async fn put(&self, uid: &str, has_profile: bool) {
        let mut inner = self.inner.lock().await;
        inner.entries.put(uid.to_string(), has_profile);
        inner.stats.current_size = inner.entries.len();
    }

    /// Forget one uid (its profile changed).
    pub async fn invalidate(&self, uid: &str) {
        let mut inner = self.inner.lock().await;
        if inner.entries.pop(uid).is_some() {
            inner.stats.invalidations += 1;
            log::debug!("Profile cache invalidated uid={uid}");
        }
        inner.stats.current_size = inner.entries.len();
    }

    /// Drop every entry (signed-in user changed).
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.entries.clear();
        inner.stats.clears += 1;
        inner.stats.current_size = 0;
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats.clone()
    }
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_CACHE_CAPACITY)
    }
}

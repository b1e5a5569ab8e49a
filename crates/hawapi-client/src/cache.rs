//! In-memory response cache keyed by canonical request URL.
//!
//! The client only talks to the cache through the [`Cache`] trait, so the
//! default unbounded [`MemoryCache`] can be swapped for the bounded
//! [`LruMemoryCache`] or any other backend.
//!
//! # Staleness Behavior
//!
//! Entries have no TTL. They live until replaced by a fresh response for the
//! same URL, deleted (the client does this after PATCH and DELETE on the
//! entity), or dropped by [`Cache::clear`].
//!
//! # Thread Safety
//!
//! Both backends guard their map with a single tokio lock, so one client can
//! be shared across tasks.

use crate::types::BaseResponse;
use async_trait::async_trait;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use tokio::sync::{Mutex, RwLock};

/// A cached GET response.
///
/// Header metadata and body are stored together so they always round-trip
/// as a pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub url: String,
    pub base_response: BaseResponse,
    /// JSON encoding of the decoded response body
    pub raw_body: Vec<u8>,
}

/// Key-value store used by the client to short-circuit repeat GETs.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns a copy of the entry stored under `key`.
    async fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Store `entry` under `key`, replacing any previous entry.
    async fn set(&self, key: String, entry: CacheEntry);

    /// Remove `key`. Returns true if an entry was present.
    async fn delete(&self, key: &str) -> bool;

    /// Number of stored entries.
    async fn size(&self) -> usize;

    /// Remove every entry and return how many were removed.
    async fn clear(&self) -> usize;
}

/// Unbounded cache backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<CacheEntry> {
        let entries = self.entries.read().await;
        entries.get(key).cloned()
    }

    async fn set(&self, key: String, entry: CacheEntry) {
        let mut entries = self.entries.write().await;
        entries.insert(key, entry);
    }

    async fn delete(&self, key: &str) -> bool {
        let mut entries = self.entries.write().await;
        entries.remove(key).is_some()
    }

    async fn size(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        count
    }
}

/// Bounded cache that evicts the least recently used entry when full.
pub struct LruMemoryCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl LruMemoryCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl std::fmt::Debug for LruMemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruMemoryCache").finish_non_exhaustive()
    }
}

#[async_trait]
impl Cache for LruMemoryCache {
    async fn get(&self, key: &str) -> Option<CacheEntry> {
        let mut entries = self.entries.lock().await;
        entries.get(key).cloned()
    }

    async fn set(&self, key: String, entry: CacheEntry) {
        let mut entries = self.entries.lock().await;
        if let Some((evicted, _)) = entries.push(key.clone(), entry) {
            if evicted != key {
                tracing::debug!(url = %evicted, "Evicted cache entry");
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().await;
        entries.pop(key).is_some()
    }

    async fn size(&self) -> usize {
        self.entries.lock().await.len()
    }

    async fn clear(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let count = entries.len();
        entries.clear();
        count
    }
}

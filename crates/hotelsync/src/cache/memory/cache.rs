//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using tokio
//! synchronization primitives and an LRU eviction policy. A single lock
//! guards the whole store, which makes every operation linearizable per key.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use hotelsync_core::cache::{Cache, Result, Updater};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Expired entries are dropped lazily on access. When `max_entries` is
/// reached the least recently used entry is evicted silently, regardless of
/// its TTL.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<Mutex<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` values.
    ///
    /// A capacity of 0 is raised to 1.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Number of physically stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.lock().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                store.pop(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.lock().await;
        if let Some((evicted, _)) = store.push(key.to_string(), CacheEntry::new(value.to_vec(), ttl))
        {
            if evicted != key {
                tracing::trace!(key = %evicted, "Evicted least recently used cache entry");
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.lock().await;
        store.pop(key);
        Ok(())
    }

    async fn update(
        &self,
        key: &str,
        ttl: Option<Duration>,
        updater: Updater,
    ) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.lock().await;

        let current = match store.get(key) {
            Some(entry) if entry.is_expired() => {
                store.pop(key);
                return Ok(None);
            }
            Some(entry) => entry.value.clone(),
            None => return Ok(None),
        };

        let updated = updater(&current)?;
        store.put(key.to_string(), CacheEntry::new(updated.clone(), ttl));
        Ok(Some(updated))
    }
}

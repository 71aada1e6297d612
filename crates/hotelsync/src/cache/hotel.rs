//! Typed hotel view over a byte-level [`Cache`].

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use hotelsync_core::cache::{
    deserialize_hotel, hotel_key, serialize_hotel, Cache, CacheError, Result,
};
use hotelsync_core::hotel::{Hotel, HotelPatch};

/// Read cache of hotel snapshots keyed by `hotel:<id>`.
///
/// Every write resets the entry's TTL. Absent, expired and evicted entries
/// are indistinguishable to callers.
#[derive(Clone)]
pub struct HotelCache {
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl HotelCache {
    pub fn new(cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached snapshot, if a live one exists.
    ///
    /// A snapshot that no longer decodes is treated as a miss.
    pub async fn get(&self, id: Uuid) -> Result<Option<Hotel>> {
        let Some(bytes) = self.cache.get(&hotel_key(id)).await? else {
            return Ok(None);
        };

        match deserialize_hotel(&bytes) {
            Ok(hotel) => Ok(Some(hotel)),
            Err(err) => {
                tracing::warn!(hotel_id = %id, error = %err, "Cached hotel deserialization failed");
                Ok(None)
            }
        }
    }

    /// Stores a full snapshot, replacing any previous one.
    pub async fn put(&self, hotel: &Hotel) -> Result<()> {
        let bytes = serialize_hotel(hotel)?;
        self.cache
            .set(&hotel_key(hotel.id), &bytes, Some(self.ttl))
            .await
    }

    /// Merges a patch into the cached snapshot of `stored.id`.
    ///
    /// `stored` is the entity store's snapshot after applying `patch`. The
    /// merge runs atomically and resets the TTL. The entry never moves
    /// backwards: a cached snapshot already at or past `stored.version` is
    /// kept as is, and a merge that disagrees with `stored` is replaced by
    /// `stored`. Returns the snapshot left in the cache.
    ///
    /// Fails with [`CacheError::NotFound`] when there is no live entry to
    /// merge into.
    pub async fn partial_update(&self, stored: &Hotel, patch: &HotelPatch) -> Result<Hotel> {
        let key = hotel_key(stored.id);
        let patch = patch.clone();
        let target = stored.clone();

        let updated = self
            .cache
            .update(
                &key,
                Some(self.ttl),
                Box::new(move |bytes: &[u8]| {
                    let mut hotel = deserialize_hotel(bytes)?;
                    if hotel.version >= target.version {
                        return Ok(bytes.to_vec());
                    }
                    patch.apply_to(&mut hotel);
                    if hotel != target {
                        tracing::debug!(
                            hotel_id = %target.id,
                            cached_version = hotel.version,
                            stored_version = target.version,
                            "Cached hotel drifted from store, replacing"
                        );
                        hotel = target;
                    }
                    Ok(serialize_hotel(&hotel)?)
                }),
            )
            .await?;

        match updated {
            Some(bytes) => Ok(deserialize_hotel(&bytes)?),
            None => Err(CacheError::NotFound(key)),
        }
    }

    /// Drops the cached snapshot. Removing a missing entry succeeds.
    pub async fn remove(&self, id: Uuid) -> Result<()> {
        self.cache.delete(&hotel_key(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use hotelsync_core::hotel::NewHotel;

    fn cache_with_ttl(ttl: Duration) -> (Arc<MemoryCache>, HotelCache) {
        let backend = Arc::new(MemoryCache::new(100));
        let cache = HotelCache::new(backend.clone(), ttl);
        (backend, cache)
    }

    fn plaza() -> Hotel {
        Hotel::from_new(Uuid::new_v4(), NewHotel::new("Plaza").with_city("Lima"))
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (_, cache) = cache_with_ttl(Duration::from_secs(30));
        let hotel = plaza();

        cache.put(&hotel).await.unwrap();

        assert_eq!(cache.get(hotel.id).await.unwrap(), Some(hotel));
    }

    #[tokio::test]
    async fn test_get_after_ttl_is_a_miss() {
        let (_, cache) = cache_with_ttl(Duration::from_millis(50));
        let hotel = plaza();
        cache.put(&hotel).await.unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(cache.get(hotel.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_undecodable_snapshot_is_a_miss() {
        let (backend, cache) = cache_with_ttl(Duration::from_secs(30));
        let id = Uuid::new_v4();
        backend.set(&hotel_key(id), b"garbage", None).await.unwrap();

        assert_eq!(cache.get(id).await.unwrap(), None);
    }

    /// The store's snapshot after applying `patch` to `hotel`.
    fn stored_after(hotel: &Hotel, patch: &HotelPatch) -> Hotel {
        let mut stored = hotel.clone();
        patch.apply_to(&mut stored);
        stored
    }

    #[tokio::test]
    async fn test_partial_update_merges_fields() {
        let (_, cache) = cache_with_ttl(Duration::from_secs(30));
        let hotel = plaza();
        cache.put(&hotel).await.unwrap();
        let patch = HotelPatch::new().with_rating(4.5);
        let stored = stored_after(&hotel, &patch);

        let updated = cache.partial_update(&stored, &patch).await.unwrap();

        assert_eq!(updated.rating, 4.5);
        assert_eq!(updated.name, "Plaza");
        assert_eq!(updated.version, 2);
        assert_eq!(updated, stored);
        assert_eq!(cache.get(hotel.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_partial_update_missing_entry() {
        let (_, cache) = cache_with_ttl(Duration::from_secs(30));
        let hotel = plaza();
        let patch = HotelPatch::new().with_rating(4.5);

        let result = cache
            .partial_update(&stored_after(&hotel, &patch), &patch)
            .await;

        assert_eq!(result, Err(CacheError::NotFound(hotel_key(hotel.id))));
        assert_eq!(cache.get(hotel.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_partial_update_replaces_drifted_snapshot() {
        let (_, cache) = cache_with_ttl(Duration::from_secs(30));
        let hotel = plaza();
        cache.put(&hotel).await.unwrap();

        // The store saw another write the cache never heard about
        let mut stored = stored_after(&hotel, &HotelPatch::new().with_city("Cusco"));
        let patch = HotelPatch::new().with_rooms(4);
        patch.apply_to(&mut stored);

        let updated = cache.partial_update(&stored, &patch).await.unwrap();

        assert_eq!(updated, stored);
        assert_eq!(updated.city, "Cusco");
    }

    #[tokio::test]
    async fn test_partial_update_never_moves_backwards() {
        let (_, cache) = cache_with_ttl(Duration::from_secs(30));
        let hotel = plaza();
        let first = HotelPatch::new().with_rating(4.0);
        let second = HotelPatch::new().with_rating(5.0);
        let v2 = stored_after(&hotel, &first);
        let v3 = stored_after(&v2, &second);
        cache.put(&v3).await.unwrap();

        // The older write's cache stage arrives late
        let kept = cache.partial_update(&v2, &first).await.unwrap();

        assert_eq!(kept, v3);
        assert_eq!(cache.get(hotel.id).await.unwrap(), Some(v3));
    }

    #[tokio::test]
    async fn test_partial_update_resets_ttl() {
        let (_, cache) = cache_with_ttl(Duration::from_millis(80));
        let hotel = plaza();
        cache.put(&hotel).await.unwrap();
        let patch = HotelPatch::new().with_rooms(3);

        tokio::time::sleep(Duration::from_millis(50)).await;
        cache
            .partial_update(&stored_after(&hotel, &patch), &patch)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(cache.get(hotel.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (_, cache) = cache_with_ttl(Duration::from_secs(30));
        let hotel = plaza();
        cache.put(&hotel).await.unwrap();

        cache.remove(hotel.id).await.unwrap();
        cache.remove(hotel.id).await.unwrap();

        assert_eq!(cache.get(hotel.id).await.unwrap(), None);
    }
}

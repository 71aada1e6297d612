//! Primary orchestrator of the hotels role.
//!
//! Every write runs three stages in order: the entity store, the read
//! cache, then event publication. A failing stage aborts the stages after it
//! and earlier effects stay in place. Once the store stage has succeeded,
//! the write's event is never lost: if the cache or publish stage fails the
//! event is parked in the [`Outbox`] before the error is returned.

use std::sync::Arc;

use uuid::Uuid;

use hotelsync_core::cache::CacheError;
use hotelsync_core::events::{EventChannel, HotelEvent};
use hotelsync_core::hotel::{validate_new_hotel, validate_patch, Hotel, HotelPatch, NewHotel};
use hotelsync_core::storage::HotelRepository;

use super::error::{Result, ServiceError};
use super::outbox::Outbox;
use crate::cache::HotelCache;

/// Cache-aside orchestration over the entity store, the read cache and the
/// event channel.
#[derive(Clone)]
pub struct HotelService {
    repository: Arc<dyn HotelRepository>,
    cache: HotelCache,
    channel: Arc<dyn EventChannel>,
    outbox: Outbox,
}

impl HotelService {
    pub fn new(
        repository: Arc<dyn HotelRepository>,
        cache: HotelCache,
        channel: Arc<dyn EventChannel>,
        outbox: Outbox,
    ) -> Self {
        Self {
            repository,
            cache,
            channel,
            outbox,
        }
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    /// Reads a hotel, preferring the cache.
    ///
    /// On a miss the store is read and the cache populated. A cache failure
    /// on either step fails the read.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Hotel> {
        if let Some(hotel) = self.cache.get(id).await.map_err(ServiceError::Cache)? {
            tracing::trace!(hotel_id = %id, "Cache hit for hotel");
            return Ok(hotel);
        }

        tracing::trace!(hotel_id = %id, "Cache miss for hotel");
        let hotel = self
            .repository
            .get_hotel(id)
            .await
            .map_err(ServiceError::from)?
            .ok_or_else(|| ServiceError::hotel_not_found(id))?;

        self.cache.put(&hotel).await.map_err(ServiceError::Cache)?;
        Ok(hotel)
    }

    /// Creates a hotel and announces it with `CREATE(id, 1)`.
    pub async fn create(&self, new_hotel: NewHotel) -> Result<Hotel> {
        validate_new_hotel(&new_hotel)?;

        // 1. Persist to storage (assigns the id)
        let hotel = self.repository.insert_hotel(new_hotel).await?;
        let event = HotelEvent::created(hotel.id, hotel.version);

        // 2. Populate cache
        if let Err(err) = self.cache.put(&hotel).await {
            return Err(self.park(event, ServiceError::Cache(err)).await);
        }

        // 3. Announce
        self.publish(event).await?;

        tracing::debug!(hotel_id = %hotel.id, name = %hotel.name, "Hotel created");
        Ok(hotel)
    }

    /// Applies a sparse patch and announces it with `UPDATE(id, version)`.
    ///
    /// An empty patch is rejected before any stage runs.
    pub async fn update(&self, id: Uuid, patch: HotelPatch) -> Result<Hotel> {
        if patch.is_empty() {
            return Err(ServiceError::NoOp(id.to_string()));
        }
        validate_patch(&patch)?;

        // 1. Persist to storage
        let hotel = self.repository.update_hotel(id, &patch).await?;
        let event = HotelEvent::updated(id, hotel.version);

        // 2. Merge into the cached snapshot, falling back to the store's
        if let Err(err) = self.refresh_cache(&hotel, &patch).await {
            return Err(self.park(event, ServiceError::Cache(err)).await);
        }

        // 3. Announce
        self.publish(event).await?;

        tracing::debug!(hotel_id = %id, version = hotel.version, "Hotel updated");
        Ok(hotel)
    }

    /// Deletes a hotel and announces it with `DELETE(id, version + 1)`.
    pub async fn delete(&self, id: Uuid) -> Result<Hotel> {
        // 1. Persist deletion to storage
        let hotel = self.repository.delete_hotel(id).await?;
        let event = HotelEvent::deleted(id, hotel.version + 1);

        // 2. Invalidate cache
        if let Err(err) = self.cache.remove(id).await {
            return Err(self.park(event, ServiceError::Cache(err)).await);
        }

        // 3. Announce
        self.publish(event).await?;

        tracing::debug!(hotel_id = %id, "Hotel deleted");
        Ok(hotel)
    }

    /// Brings the cache in line with the store snapshot of an update.
    ///
    /// Without a live entry the store's snapshot is cached instead.
    async fn refresh_cache(
        &self,
        stored: &Hotel,
        patch: &HotelPatch,
    ) -> std::result::Result<(), CacheError> {
        match self.cache.partial_update(stored, patch).await {
            Ok(_) => Ok(()),
            Err(CacheError::NotFound(_)) => self.cache.put(stored).await,
            Err(err) => Err(err),
        }
    }

    async fn publish(&self, event: HotelEvent) -> Result<()> {
        if let Err(err) = self.channel.publish(&event).await {
            return Err(self.park(event, ServiceError::Transport(err)).await);
        }
        Ok(())
    }

    /// Parks the event for the relay and hands back the stage error.
    async fn park(&self, event: HotelEvent, err: ServiceError) -> ServiceError {
        tracing::warn!(
            hotel_id = %event.hotel_id,
            operation = %event.operation,
            error = %err,
            "Write stage failed after store commit"
        );
        self.outbox.enqueue(event).await;
        err
    }
}

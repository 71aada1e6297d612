//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use hotelsync_core::hotel::{Hotel, HotelPatch, NewHotel, NewReservation, Reservation};
use hotelsync_core::storage::{
    HotelRepository, RepositoryError, ReservationRepository, Result,
};

/// In-memory entity store.
///
/// Ids are assigned here on insert. Each mutation holds the write lock for
/// its whole read-modify-write, so concurrent patches to one hotel never
/// lose an update.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    hotels: Arc<RwLock<HashMap<Uuid, Hotel>>>,
    reservations: Arc<RwLock<HashMap<Uuid, Reservation>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            hotels: Arc::new(RwLock::new(HashMap::new())),
            reservations: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl HotelRepository for InMemoryRepository {
    async fn get_hotel(&self, id: Uuid) -> Result<Option<Hotel>> {
        let hotels = self.hotels.read().await;
        Ok(hotels.get(&id).cloned())
    }

    async fn insert_hotel(&self, hotel: NewHotel) -> Result<Hotel> {
        let hotel = Hotel::from_new(Uuid::new_v4(), hotel);
        let mut hotels = self.hotels.write().await;
        hotels.insert(hotel.id, hotel.clone());
        Ok(hotel)
    }

    async fn update_hotel(&self, id: Uuid, patch: &HotelPatch) -> Result<Hotel> {
        if patch.is_empty() {
            return Err(RepositoryError::NoOp {
                entity_type: "Hotel",
                id: id.to_string(),
            });
        }

        let mut hotels = self.hotels.write().await;
        let hotel = hotels
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::hotel_not_found(id))?;
        patch.apply_to(hotel);
        Ok(hotel.clone())
    }

    async fn delete_hotel(&self, id: Uuid) -> Result<Hotel> {
        let mut hotels = self.hotels.write().await;
        hotels
            .remove(&id)
            .ok_or_else(|| RepositoryError::hotel_not_found(id))
    }
}

#[async_trait]
impl ReservationRepository for InMemoryRepository {
    async fn create_reservation(&self, reservation: NewReservation) -> Result<Reservation> {
        let reservation = Reservation::from_new(Uuid::new_v4(), reservation);
        let mut reservations = self.reservations.write().await;
        reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn delete_reservation(&self, id: Uuid) -> Result<()> {
        let mut reservations = self.reservations.write().await;
        if reservations.remove(&id).is_none() {
            return Err(RepositoryError::reservation_not_found(id));
        }
        Ok(())
    }

    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let mut result: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.hotel_id == hotel_id)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.check_in);
        Ok(result)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let mut result: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.check_in);
        Ok(result)
    }

    async fn list_by_user_and_hotel(
        &self,
        user_id: Uuid,
        hotel_id: Uuid,
    ) -> Result<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let mut result: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.user_id == user_id && r.hotel_id == hotel_id)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.check_in);
        Ok(result)
    }
}

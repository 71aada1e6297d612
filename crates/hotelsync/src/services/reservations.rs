//! Reservations and room availability.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use hotelsync_core::hotel::{
    availability, validate_reservation, AvailabilityQuery, NewReservation, Reservation,
};
use hotelsync_core::storage::ReservationRepository;

use super::error::{Result, ServiceError};
use super::hotels::HotelService;

/// Books and lists stays. Hotel lookups go through the cached read path.
#[derive(Clone)]
pub struct ReservationService {
    repository: Arc<dyn ReservationRepository>,
    hotels: HotelService,
}

impl ReservationService {
    pub fn new(repository: Arc<dyn ReservationRepository>, hotels: HotelService) -> Self {
        Self { repository, hotels }
    }

    /// Books a stay at an existing hotel.
    ///
    /// Room capacity is not re-checked here; see [`Self::availability`].
    pub async fn create(&self, new: NewReservation) -> Result<Reservation> {
        validate_reservation(&new)?;
        self.hotels.get_by_id(new.hotel_id).await?;

        let reservation = self.repository.create_reservation(new).await?;
        tracing::debug!(
            reservation_id = %reservation.id,
            hotel_id = %reservation.hotel_id,
            "Reservation created"
        );
        Ok(reservation)
    }

    pub async fn cancel(&self, id: Uuid) -> Result<()> {
        self.repository.delete_reservation(id).await?;
        tracing::debug!(reservation_id = %id, "Reservation cancelled");
        Ok(())
    }

    pub async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Reservation>> {
        Ok(self.repository.list_by_hotel(hotel_id).await?)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Reservation>> {
        Ok(self.repository.list_by_user(user_id).await?)
    }

    pub async fn list_by_user_and_hotel(
        &self,
        user_id: Uuid,
        hotel_id: Uuid,
    ) -> Result<Vec<Reservation>> {
        Ok(self
            .repository
            .list_by_user_and_hotel(user_id, hotel_id)
            .await?)
    }

    /// Reports, per requested hotel, whether a room is free for the stay.
    ///
    /// Unknown hotels report `false`.
    pub async fn availability(&self, query: &AvailabilityQuery) -> Result<HashMap<Uuid, bool>> {
        query.validate()?;

        let mut result = HashMap::with_capacity(query.hotel_ids.len());
        for &hotel_id in &query.hotel_ids {
            let hotel = match self.hotels.get_by_id(hotel_id).await {
                Ok(hotel) => Some(hotel),
                Err(ServiceError::NotFound { .. }) => None,
                Err(err) => return Err(err),
            };
            let reservations = self.repository.list_by_hotel(hotel_id).await?;
            result.insert(
                hotel_id,
                availability(hotel.as_ref(), &reservations, query.check_in, query.check_out),
            );
        }
        Ok(result)
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::hotel::{Hotel, HotelPatch, NewHotel, NewReservation, Reservation};

use super::Result;

/// The entity store: authoritative storage for hotels.
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Gets a hotel by its ID.
    async fn get_hotel(&self, id: Uuid) -> Result<Option<Hotel>>;

    /// Inserts a new hotel, assigning its ID. Returns the stored record.
    async fn insert_hotel(&self, hotel: NewHotel) -> Result<Hotel>;

    /// Applies a sparse patch and returns the updated record.
    ///
    /// Fails with `NoOp` when the patch carries no field and with
    /// `NotFound` when the hotel does not exist.
    async fn update_hotel(&self, id: Uuid, patch: &HotelPatch) -> Result<Hotel>;

    /// Deletes a hotel and returns the record that was removed.
    async fn delete_hotel(&self, id: Uuid) -> Result<Hotel>;
}

/// Storage for reservations.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persists a reservation, assigning its ID.
    async fn create_reservation(&self, reservation: NewReservation) -> Result<Reservation>;

    /// Deletes a reservation by its ID.
    async fn delete_reservation(&self, id: Uuid) -> Result<()>;

    /// Gets all reservations for a hotel.
    async fn list_by_hotel(&self, hotel_id: Uuid) -> Result<Vec<Reservation>>;

    /// Gets all reservations made by a user.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Reservation>>;

    /// Gets the reservations a user holds at one hotel.
    async fn list_by_user_and_hotel(&self, user_id: Uuid, hotel_id: Uuid)
        -> Result<Vec<Reservation>>;
}

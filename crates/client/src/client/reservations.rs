//! Reservation and availability API operations.

use std::collections::HashMap;

use uuid::Uuid;

use hotelsync_core::hotel::{AvailabilityQuery, NewReservation, Reservation};

use super::HotelsyncClient;
use crate::error::Result;

impl HotelsyncClient {
    /// Book a stay.
    pub async fn create_reservation(&self, reservation: &NewReservation) -> Result<Reservation> {
        let response = self
            .client
            .post(self.url("/api/reservations"))
            .json(reservation)
            .send()
            .await?;
        self.handle_response(response, "reservation").await
    }

    /// Cancel a reservation.
    pub async fn cancel_reservation(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/reservations/{id}")))
            .send()
            .await?;
        self.handle_empty_response(response, &format!("reservation {id}"))
            .await
    }

    /// List the reservations of a hotel.
    pub async fn list_hotel_reservations(&self, hotel_id: Uuid) -> Result<Vec<Reservation>> {
        let response = self
            .client
            .get(self.url(&format!("/api/hotels/{hotel_id}/reservations")))
            .send()
            .await?;
        self.handle_response(response, "reservations").await
    }

    /// List the reservations of a user, optionally at one hotel.
    pub async fn list_user_reservations(
        &self,
        user_id: Uuid,
        hotel_id: Option<Uuid>,
    ) -> Result<Vec<Reservation>> {
        let path = match hotel_id {
            Some(hotel_id) => format!("/api/users/{user_id}/hotels/{hotel_id}/reservations"),
            None => format!("/api/users/{user_id}/reservations"),
        };
        let response = self.client.get(self.url(&path)).send().await?;
        self.handle_response(response, "reservations").await
    }

    /// Check which hotels still have a room for the stay.
    pub async fn availability(&self, query: &AvailabilityQuery) -> Result<HashMap<Uuid, bool>> {
        let response = self
            .client
            .get(self.url("/api/availability"))
            .query(query)
            .send()
            .await?;
        self.handle_response(response, "availability").await
    }
}

//! Hotel API operations.

use uuid::Uuid;

use hotelsync_core::hotel::{Hotel, HotelPatch, NewHotel};

use super::HotelsyncClient;
use crate::error::Result;

impl HotelsyncClient {
    /// Get hotel by ID.
    pub async fn get_hotel(&self, id: Uuid) -> Result<Hotel> {
        let response = self
            .client
            .get(self.url(&format!("/api/hotels/{id}")))
            .send()
            .await?;
        self.handle_response(response, &format!("hotel {id}")).await
    }

    /// Create a new hotel. The server assigns the ID.
    pub async fn create_hotel(&self, hotel: &NewHotel) -> Result<Hotel> {
        let response = self
            .client
            .post(self.url("/api/hotels"))
            .json(hotel)
            .send()
            .await?;
        self.handle_response(response, "hotel").await
    }

    /// Apply a sparse update to a hotel.
    pub async fn update_hotel(&self, id: Uuid, patch: &HotelPatch) -> Result<Hotel> {
        let response = self
            .client
            .put(self.url(&format!("/api/hotels/{id}")))
            .json(patch)
            .send()
            .await?;
        self.handle_response(response, &format!("hotel {id}")).await
    }

    /// Delete hotel by ID.
    pub async fn delete_hotel(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/hotels/{id}")))
            .send()
            .await?;
        self.handle_empty_response(response, &format!("hotel {id}"))
            .await
    }
}

//! API request types for hotel operations.
//!
//! These types are shared between the server and client for type-safe API
//! communication. Hotel creation and updates travel as [`NewHotel`] and
//! [`HotelPatch`] directly.
//!
//! [`NewHotel`]: super::NewHotel
//! [`HotelPatch`]: super::HotelPatch

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValidationError;

/// Query parameters for `GET /api/availability`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// Comma-separated on the wire: `hotel_ids=a,b,c`.
    #[serde(
        deserialize_with = "crate::serde::deserialize_comma_separated_uuids",
        serialize_with = "serialize_comma_separated"
    )]
    pub hotel_ids: Vec<Uuid>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

impl AvailabilityQuery {
    /// Creates a query, rejecting an empty or inverted stay.
    pub fn new(
        hotel_ids: Vec<Uuid>,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let query = Self {
            hotel_ids,
            check_in,
            check_out,
        };
        query.validate()?;
        Ok(query)
    }

    /// Checks that check-in is strictly before check-out.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.check_in >= self.check_out {
            return Err(ValidationError::InvalidStay);
        }
        Ok(())
    }
}

fn serialize_comma_separated<S>(ids: &[Uuid], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let joined = ids
        .iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&joined)
}

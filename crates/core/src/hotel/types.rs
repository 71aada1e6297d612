use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A hotel as held by the system of record.
///
/// The `id` is assigned by the entity store on insert and never changes
/// afterwards. It is the join key between the store, the read cache and the
/// search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub price_per_night: f64,
    pub rating: f64,
    pub available_rooms: u32,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub amenities: Vec<String>,
    /// Starts at 1 on insert and grows by one with every applied patch.
    pub version: u64,
}

impl Hotel {
    /// Builds the stored record for a new hotel under the given id.
    pub fn from_new(id: Uuid, new: NewHotel) -> Self {
        Self {
            id,
            name: new.name,
            address: new.address,
            city: new.city,
            state: new.state,
            country: new.country,
            phone: new.phone,
            email: new.email,
            price_per_night: new.price_per_night,
            rating: new.rating,
            available_rooms: new.available_rooms,
            check_in_time: new.check_in_time,
            check_out_time: new.check_out_time,
            amenities: new.amenities,
            version: 1,
        }
    }
}

/// A hotel that has not been persisted yet, so it has no id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewHotel {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub price_per_night: f64,
    pub rating: f64,
    pub available_rooms: u32,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub amenities: Vec<String>,
}

impl NewHotel {
    /// Creates a new hotel with a name and defaults everywhere else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_rooms(mut self, rooms: u32) -> Self {
        self.available_rooms = rooms;
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }
}

/// A sparse update to a hotel.
///
/// `None` means "not provided". `Some` always overwrites, including with an
/// empty string or zero, so a field can be explicitly cleared. The nested
/// option on the check-in/out times distinguishes "leave as is" (`None`)
/// from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_rooms: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde::deserialize_double_option"
    )]
    pub check_in_time: Option<Option<NaiveTime>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde::deserialize_double_option"
    )]
    pub check_out_time: Option<Option<NaiveTime>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
}

impl HotelPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_rooms(mut self, rooms: u32) -> Self {
        self.available_rooms = Some(rooms);
        self
    }

    pub fn with_amenities(mut self, amenities: Vec<String>) -> Self {
        self.amenities = Some(amenities);
        self
    }

    /// Returns true when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.country.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.price_per_night.is_none()
            && self.rating.is_none()
            && self.available_rooms.is_none()
            && self.check_in_time.is_none()
            && self.check_out_time.is_none()
            && self.amenities.is_none()
    }

    /// Merges the provided fields into `hotel` and bumps its version.
    ///
    /// An empty patch leaves the hotel untouched, version included.
    pub fn apply_to(&self, hotel: &mut Hotel) {
        if self.is_empty() {
            return;
        }
        if let Some(name) = &self.name {
            hotel.name = name.clone();
        }
        if let Some(address) = &self.address {
            hotel.address = address.clone();
        }
        if let Some(city) = &self.city {
            hotel.city = city.clone();
        }
        if let Some(state) = &self.state {
            hotel.state = state.clone();
        }
        if let Some(country) = &self.country {
            hotel.country = country.clone();
        }
        if let Some(phone) = &self.phone {
            hotel.phone = phone.clone();
        }
        if let Some(email) = &self.email {
            hotel.email = email.clone();
        }
        if let Some(price) = self.price_per_night {
            hotel.price_per_night = price;
        }
        if let Some(rating) = self.rating {
            hotel.rating = rating;
        }
        if let Some(rooms) = self.available_rooms {
            hotel.available_rooms = rooms;
        }
        if let Some(time) = self.check_in_time {
            hotel.check_in_time = time;
        }
        if let Some(time) = self.check_out_time {
            hotel.check_out_time = time;
        }
        if let Some(amenities) = &self.amenities {
            hotel.amenities = amenities.clone();
        }
        hotel.version += 1;
    }
}

/// A booking of a hotel by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub user_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

impl Reservation {
    /// Builds the stored record for a new reservation under the given id.
    pub fn from_new(id: Uuid, new: NewReservation) -> Self {
        Self {
            id,
            hotel_id: new.hotel_id,
            user_id: new.user_id,
            check_in: new.check_in,
            check_out: new.check_out,
        }
    }
}

/// A reservation request before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub hotel_id: Uuid,
    pub user_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plaza() -> Hotel {
        Hotel::from_new(
            Uuid::nil(),
            NewHotel::new("Plaza")
                .with_city("Lima")
                .with_amenities(["wifi", "pool"]),
        )
    }

    #[test]
    fn test_from_new_starts_at_version_one() {
        let hotel = plaza();

        assert_eq!(hotel.version, 1);
        assert_eq!(hotel.name, "Plaza");
        assert_eq!(hotel.city, "Lima");
        assert_eq!(hotel.rating, 0.0);
        assert_eq!(hotel.amenities, vec!["wifi", "pool"]);
    }

    #[test]
    fn test_patch_only_touches_provided_fields() {
        let mut hotel = plaza();
        HotelPatch::new().with_rating(4.5).apply_to(&mut hotel);

        assert_eq!(hotel.rating, 4.5);
        assert_eq!(hotel.name, "Plaza");
        assert_eq!(hotel.city, "Lima");
        assert_eq!(hotel.version, 2);
    }

    #[test]
    fn test_patch_can_clear_a_field() {
        let mut hotel = plaza();
        let patch = HotelPatch {
            city: Some(String::new()),
            amenities: Some(Vec::new()),
            ..HotelPatch::default()
        };
        patch.apply_to(&mut hotel);

        assert_eq!(hotel.city, "");
        assert!(hotel.amenities.is_empty());
    }

    #[test]
    fn test_empty_patch_is_a_no_op() {
        let mut hotel = plaza();
        let patch = HotelPatch::new();

        assert!(patch.is_empty());
        patch.apply_to(&mut hotel);
        assert_eq!(hotel, plaza());
    }

    #[test]
    fn test_patch_deserialize_distinguishes_null_from_missing() {
        let patch: HotelPatch = serde_json::from_str(r#"{"check_in_time":null}"#).unwrap();
        assert_eq!(patch.check_in_time, Some(None));
        assert!(patch.check_out_time.is_none());

        let patch: HotelPatch = serde_json::from_str(r#"{"check_in_time":"14:00:00"}"#).unwrap();
        assert_eq!(
            patch.check_in_time,
            Some(NaiveTime::from_hms_opt(14, 0, 0))
        );
    }

    #[test]
    fn test_new_hotel_deserialize_fills_defaults() {
        let new: NewHotel = serde_json::from_str(r#"{"name":"Plaza","city":"Lima"}"#).unwrap();

        assert_eq!(new, NewHotel::new("Plaza").with_city("Lima"));
    }
}

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::ValidationError;
use super::types::{Hotel, HotelPatch, NewHotel, NewReservation, Reservation};

const MAX_RATING: f64 = 5.0;

fn check_rating(rating: f64) -> Result<(), ValidationError> {
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange);
    }
    Ok(())
}

fn check_price(price: f64) -> Result<(), ValidationError> {
    if price < 0.0 || price.is_nan() {
        return Err(ValidationError::NegativePrice);
    }
    Ok(())
}

/// Validates a hotel before it is inserted.
pub fn validate_new_hotel(hotel: &NewHotel) -> Result<(), ValidationError> {
    if hotel.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    check_rating(hotel.rating)?;
    check_price(hotel.price_per_night)
}

/// Validates the provided fields of a patch.
///
/// Descriptive fields may be cleared, the name may not.
pub fn validate_patch(patch: &HotelPatch) -> Result<(), ValidationError> {
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(ValidationError::EmptyName);
    }
    if let Some(rating) = patch.rating {
        check_rating(rating)?;
    }
    if let Some(price) = patch.price_per_night {
        check_price(price)?;
    }
    Ok(())
}

/// Validates a reservation request.
///
/// The stay must be non-empty: check-in strictly before check-out.
pub fn validate_reservation(reservation: &NewReservation) -> Result<(), ValidationError> {
    if reservation.hotel_id.is_nil() {
        return Err(ValidationError::MissingHotelId);
    }
    if reservation.user_id.is_nil() {
        return Err(ValidationError::MissingUserId);
    }
    if reservation.check_in >= reservation.check_out {
        return Err(ValidationError::InvalidStay);
    }
    Ok(())
}

/// Returns true if two half-open stays `[in, out)` share at least one instant.
pub fn stays_overlap(
    a_in: DateTime<Utc>,
    a_out: DateTime<Utc>,
    b_in: DateTime<Utc>,
    b_out: DateTime<Utc>,
) -> bool {
    a_in < b_out && b_in < a_out
}

/// Counts the reservations of `hotel_id` that overlap the given stay.
pub fn count_overlapping(
    reservations: &[Reservation],
    hotel_id: Uuid,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> usize {
    reservations
        .iter()
        .filter(|r| r.hotel_id == hotel_id)
        .filter(|r| stays_overlap(r.check_in, r.check_out, check_in, check_out))
        .count()
}

/// Decides whether a hotel still has a free room for the given stay.
///
/// An unknown hotel (`None`) is never available.
pub fn availability(
    hotel: Option<&Hotel>,
    reservations: &[Reservation],
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> bool {
    let Some(hotel) = hotel else {
        return false;
    };
    let taken = count_overlapping(reservations, hotel.id, check_in, check_out);
    taken < hotel.available_rooms as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 12, 0, 0).unwrap()
    }

    fn reservation(hotel_id: Uuid, check_in: u32, check_out: u32) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            hotel_id,
            user_id: Uuid::new_v4(),
            check_in: day(check_in),
            check_out: day(check_out),
        }
    }

    fn hotel_with_rooms(rooms: u32) -> Hotel {
        Hotel::from_new(Uuid::new_v4(), NewHotel::new("Plaza").with_rooms(rooms))
    }

    #[test]
    fn test_validate_new_hotel() {
        assert!(validate_new_hotel(&NewHotel::new("Plaza")).is_ok());
        assert_eq!(
            validate_new_hotel(&NewHotel::new("   ")),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            validate_new_hotel(&NewHotel::new("Plaza").with_rating(7.0)),
            Err(ValidationError::RatingOutOfRange)
        );
    }

    #[test]
    fn test_validate_patch() {
        assert!(validate_patch(&HotelPatch::new().with_city("")).is_ok());
        assert_eq!(
            validate_patch(&HotelPatch::new().with_name("")),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            validate_patch(&HotelPatch::new().with_rating(-1.0)),
            Err(ValidationError::RatingOutOfRange)
        );
    }

    #[test]
    fn test_validate_reservation_requires_ordered_stay() {
        let mut new = NewReservation {
            hotel_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            check_in: day(5),
            check_out: day(7),
        };
        assert!(validate_reservation(&new).is_ok());

        new.check_out = day(5);
        assert_eq!(
            validate_reservation(&new),
            Err(ValidationError::InvalidStay)
        );

        new.check_out = day(3);
        assert_eq!(
            validate_reservation(&new),
            Err(ValidationError::InvalidStay)
        );
    }

    #[test]
    fn test_validate_reservation_requires_ids() {
        let new = NewReservation {
            hotel_id: Uuid::nil(),
            user_id: Uuid::new_v4(),
            check_in: day(5),
            check_out: day(7),
        };
        assert_eq!(
            validate_reservation(&new),
            Err(ValidationError::MissingHotelId)
        );
    }

    #[test]
    fn test_stays_overlap_is_half_open() {
        assert!(stays_overlap(day(1), day(5), day(4), day(6)));
        assert!(!stays_overlap(day(1), day(5), day(5), day(6)));
        assert!(stays_overlap(day(2), day(3), day(1), day(9)));
    }

    #[test]
    fn test_count_overlapping_filters_by_hotel() {
        let hotel_id = Uuid::new_v4();
        let reservations = vec![
            reservation(hotel_id, 1, 4),
            reservation(hotel_id, 10, 12),
            reservation(Uuid::new_v4(), 1, 4),
        ];

        assert_eq!(count_overlapping(&reservations, hotel_id, day(2), day(3)), 1);
    }

    #[test]
    fn test_availability() {
        let hotel = hotel_with_rooms(2);
        let reservations = vec![reservation(hotel.id, 1, 4), reservation(hotel.id, 2, 6)];

        assert!(!availability(Some(&hotel), &reservations, day(3), day(4)));
        assert!(availability(Some(&hotel), &reservations, day(5), day(8)));
        assert!(availability(Some(&hotel), &reservations, day(10), day(12)));
    }

    #[test]
    fn test_availability_unknown_hotel() {
        assert!(!availability(None, &[], day(1), day(2)));
    }
}

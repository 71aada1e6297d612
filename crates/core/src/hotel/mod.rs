mod error;
mod operations;
mod requests;
mod types;

pub use error::ValidationError;
pub use operations::{
    availability, count_overlapping, stays_overlap, validate_new_hotel, validate_patch,
    validate_reservation,
};
pub use requests::AvailabilityQuery;
pub use types::{Hotel, HotelPatch, NewHotel, NewReservation, Reservation};

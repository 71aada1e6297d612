use thiserror::Error;

/// Errors raised when a hotel or reservation fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Hotel name cannot be empty")]
    EmptyName,
    #[error("Rating must be between 0 and 5")]
    RatingOutOfRange,
    #[error("Price per night cannot be negative")]
    NegativePrice,
    #[error("Check-in must be before check-out")]
    InvalidStay,
    #[error("Hotel ID is required")]
    MissingHotelId,
    #[error("User ID is required")]
    MissingUserId,
}

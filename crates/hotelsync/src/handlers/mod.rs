pub mod error;
pub mod health;
pub mod hotels;
pub mod reservations;
pub mod search;

pub use error::AppError;

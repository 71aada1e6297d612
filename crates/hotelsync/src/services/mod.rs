//! Orchestration over the storage, cache, event and index seams.
//!
//! The hotels role is served by [`HotelService`] and [`ReservationService`];
//! the search role by [`SearchService`] fed through an [`EventConsumer`].

pub mod consumer;
pub mod error;
pub mod fetcher;
pub mod hotels;
pub mod outbox;
pub mod reservations;
pub mod search;

pub use consumer::{DeadLetterQueue, EventConsumer};
pub use error::{service_error_to_status_code, ServiceError};
pub use fetcher::{HotelFetcher, HttpFetcher, LocalFetcher};
pub use hotels::HotelService;
pub use outbox::Outbox;
pub use reservations::ReservationService;
pub use search::SearchService;

mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{hotel_id_from_key, hotel_key};
pub use serialization::{deserialize_hotel, serialize_hotel, SerializationError};
pub use traits::{Cache, Updater};

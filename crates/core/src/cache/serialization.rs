//! Pure functions for serializing/deserializing domain types to/from cache bytes.
//!
//! These functions use JSON serialization for cache storage, providing
//! human-readable cache values that are easy to debug and inspect.

use crate::hotel::Hotel;
use thiserror::Error;

use super::CacheError;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

impl From<SerializationError> for CacheError {
    fn from(err: SerializationError) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a hotel snapshot to JSON bytes.
pub fn serialize_hotel(hotel: &Hotel) -> Result<Vec<u8>> {
    serde_json::to_vec(hotel).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a hotel snapshot.
pub fn deserialize_hotel(bytes: &[u8]) -> Result<Hotel> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotel::NewHotel;
    use uuid::Uuid;

    #[test]
    fn test_hotel_snapshot_survives_cache_bytes() {
        let hotel = Hotel::from_new(
            Uuid::new_v4(),
            NewHotel::new("Plaza")
                .with_city("Lima")
                .with_rating(4.5)
                .with_amenities(["wifi"]),
        );

        let bytes = serialize_hotel(&hotel).unwrap();
        let restored = deserialize_hotel(&bytes).unwrap();

        assert_eq!(restored, hotel);
    }

    #[test]
    fn test_deserialize_garbage_fails() {
        let result = deserialize_hotel(b"not json");
        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_serialization_error_converts_to_cache_error() {
        let err: CacheError = SerializationError::DeserializeFailed("eof".to_string()).into();
        assert_eq!(
            err,
            CacheError::Serialization("Failed to deserialize: eof".to_string())
        );
    }
}

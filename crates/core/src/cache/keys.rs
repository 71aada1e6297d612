use uuid::Uuid;

const HOTEL_PREFIX: &str = "hotel:";

/// Returns the cache key for a single hotel.
pub fn hotel_key(hotel_id: Uuid) -> String {
    format!("{HOTEL_PREFIX}{hotel_id}")
}

/// Extracts the hotel ID from a cache key, if it is one.
///
/// # Examples
///
/// ```
/// use hotelsync_core::cache::{hotel_id_from_key, hotel_key};
/// use uuid::Uuid;
///
/// let id = Uuid::nil();
/// assert_eq!(hotel_id_from_key(&hotel_key(id)), Some(id));
/// assert_eq!(hotel_id_from_key("user:123"), None);
/// ```
pub fn hotel_id_from_key(key: &str) -> Option<Uuid> {
    let rest = key.strip_prefix(HOTEL_PREFIX)?;
    Uuid::parse_str(rest).ok()
}

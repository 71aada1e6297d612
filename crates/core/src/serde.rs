//! Serde helper functions for request deserialization.
//!
//! These cover the shapes that plain derives get wrong: nullable patch
//! fields and comma-separated id lists in query strings.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Deserialize a present field into `Some(value)`, keeping `null` as `Some(None)`.
///
/// Combine with `#[serde(default)]` so a missing field stays `None`.
pub fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize a comma-separated list of UUIDs (e.g. `a,b,c`).
///
/// Blank segments are skipped, so a trailing comma is accepted.
pub fn deserialize_comma_separated_uuids<'de, D>(deserializer: D) -> Result<Vec<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| Uuid::parse_str(part).map_err(serde::de::Error::custom))
        .collect()
}

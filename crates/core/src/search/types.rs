use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::hotel::Hotel;

/// A schemaless index document. Query results may be partial.
pub type IndexDocument = Map<String, Value>;

/// The only field searches are scoped to today.
pub const NAME_FIELD: &str = "name";

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 100;

/// A text query restricted to one document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldQuery {
    pub field: String,
    pub text: String,
}

impl FieldQuery {
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Terms of the query text, split the same way as indexed text.
    pub fn terms(&self) -> Vec<String> {
        tokenize(&self.text)
    }
}

/// Splits text into lowercased words on every non-alphanumeric character.
///
/// Indexed fields and query text both go through this, so a name always
/// matches itself.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Query parameters for `GET /api/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            limit: DEFAULT_SEARCH_LIMIT,
            offset: 0,
        }
    }

    /// The limit clamped to `1..=MAX_SEARCH_LIMIT`.
    pub fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_SEARCH_LIMIT)
    }
}

/// A search hit as returned to clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelSummary {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub price_per_night: f64,
    pub rating: f64,
    pub amenities: Vec<String>,
}

/// Builds the full index document for a hotel.
pub fn document_from_hotel(hotel: &Hotel) -> IndexDocument {
    let value = json!({
        "id": hotel.id.to_string(),
        "name": hotel.name,
        "address": hotel.address,
        "city": hotel.city,
        "state": hotel.state,
        "country": hotel.country,
        "price_per_night": hotel.price_per_night,
        "rating": hotel.rating,
        "available_rooms": hotel.available_rooms,
        "amenities": hotel.amenities,
        "version": hotel.version,
    });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

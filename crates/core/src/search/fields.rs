//! Defensive readers for index documents.
//!
//! Index backends may return a field as a scalar or as a single-element
//! array, or leave it out. A malformed field degrades to its empty value
//! instead of failing the whole result.

use serde_json::Value;

use super::{HotelSummary, IndexDocument};

/// Reads a string field, unwrapping a one-element array. Defaults to `""`.
pub fn get_string_field(doc: &IndexDocument, field: &str) -> String {
    match doc.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(values)) => match values.first() {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        },
        _ => String::new(),
    }
}

/// Reads a float field, unwrapping a one-element array. Defaults to `0.0`.
pub fn get_float_field(doc: &IndexDocument, field: &str) -> f64 {
    let value = match doc.get(field) {
        Some(Value::Array(values)) => values.first(),
        other => other,
    };
    value.and_then(Value::as_f64).unwrap_or(0.0)
}

/// Reads a list of strings, keeping only the string elements.
pub fn get_string_list(doc: &IndexDocument, field: &str) -> Vec<String> {
    match doc.get(field) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Maps an index document to a search hit, field by field.
pub fn summary_from_document(doc: &IndexDocument) -> HotelSummary {
    HotelSummary {
        id: get_string_field(doc, "id"),
        name: get_string_field(doc, "name"),
        address: get_string_field(doc, "address"),
        city: get_string_field(doc, "city"),
        state: get_string_field(doc, "state"),
        country: get_string_field(doc, "country"),
        price_per_night: get_float_field(doc, "price_per_night"),
        rating: get_float_field(doc, "rating"),
        amenities: get_string_list(doc, "amenities"),
    }
}

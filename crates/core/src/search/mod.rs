//! Search index seam and the pure mapping between hotels and index documents.

mod error;
mod fields;
mod traits;
mod types;

pub use error::{IndexError, Result};
pub use fields::{get_float_field, get_string_field, get_string_list, summary_from_document};
pub use traits::IndexStore;
pub use types::{
    document_from_hotel, tokenize, FieldQuery, HotelSummary, IndexDocument, SearchQuery,
    DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, NAME_FIELD,
};

//! Core for the hotelsync project.
//!
//! Pure domain types plus the trait seams that the service crate implements:
//! the entity store, the read cache, the event channel and the search index.

pub mod cache;
pub mod events;
pub mod hotel;
pub mod search;
pub mod serde;
pub mod status;
pub mod storage;

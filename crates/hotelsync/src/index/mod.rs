//! Search index backends.
//!
//! Concrete implementations of `hotelsync_core::search::IndexStore`.

pub mod inmemory;

pub use inmemory::InMemoryIndex;

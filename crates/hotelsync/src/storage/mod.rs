//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `hotelsync_core::storage`. Only the in-memory entity store ships today;
//! database drivers plug in behind the same traits.

pub mod inmemory;

pub use inmemory::InMemoryRepository;

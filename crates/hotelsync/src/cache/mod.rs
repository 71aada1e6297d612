//! Read cache.
//!
//! [`memory::MemoryCache`] is the byte-level backend implementing
//! `hotelsync_core::cache::Cache`; [`HotelCache`] is the typed hotel view on
//! top of any such backend, holding the TTL policy.

pub mod hotel;
pub mod memory;

pub use hotel::HotelCache;
pub use memory::MemoryCache;

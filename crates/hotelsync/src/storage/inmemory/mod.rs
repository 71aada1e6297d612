//! In-memory storage backend.
//!
//! Stores hotels and reservations in HashMaps wrapped in `Arc<RwLock<_>>`.
//! Nothing is persisted; data is lost when the repository is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use hotelsync::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! let hotel = repo.insert_hotel(NewHotel::new("Plaza")).await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;

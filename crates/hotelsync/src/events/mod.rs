//! Event channel backends.
//!
//! [`MemoryChannel`] is always available and connects the roles of a single
//! process. The `redis` feature adds [`RedisChannel`], a list-backed queue
//! shared by separate hotels and search processes.
//!
//! # Examples
//!
//! Build with the Redis transport:
//! ```bash
//! cargo build -p hotelsync --features redis
//! ```

// Only the tests reach the in-process channel when Redis carries events
#[cfg_attr(feature = "redis", allow(dead_code))]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg_attr(feature = "redis", allow(unused_imports))]
pub use memory::MemoryChannel;

#[cfg(feature = "redis")]
pub use redis_impl::RedisChannel;

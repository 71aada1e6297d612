use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Read-modify-write step applied to a live cache value.
pub type Updater = Box<dyn FnOnce(&[u8]) -> Result<Vec<u8>> + Send>;

/// Trait for basic cache operations.
///
/// Implementations must serialize operations on the same key so that a
/// `get` never observes a half-applied `update`.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    ///
    /// Expired and evicted values are reported as `None`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Atomically replaces a live value with the updater's output and resets its TTL.
    ///
    /// Returns `Ok(None)` without calling the updater when the key is absent
    /// or expired. An updater error leaves the stored value untouched.
    async fn update(
        &self,
        key: &str,
        ttl: Option<Duration>,
        updater: Updater,
    ) -> Result<Option<Vec<u8>>>;
}

use std::pin::Pin;

use async_trait::async_trait;
use tokio_stream::Stream;

use super::{HotelEvent, Result};

/// Stream of events delivered to a subscriber.
///
/// Yielding an item acknowledges it; the stream ends after a fatal error.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<HotelEvent>> + Send>>;

/// Named, best-effort notification transport.
#[async_trait]
pub trait EventChannel: Send + Sync {
    /// Publishes an event without waiting for any delivery confirmation.
    async fn publish(&self, event: &HotelEvent) -> Result<()>;

    /// Subscribes to the channel as a consumer.
    async fn subscribe(&self) -> Result<EventStream>;
}

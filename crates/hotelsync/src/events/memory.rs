//! In-process event channel over a tokio broadcast channel.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use hotelsync_core::events::{EventChannel, EventStream, HotelEvent, Result};

/// Messages a subscriber may fall behind before it starts skipping.
const CHANNEL_CAPACITY: usize = 1024;

/// Named in-memory event channel.
///
/// Publishing with no subscriber succeeds and the event is dropped. A
/// subscriber that falls more than `CHANNEL_CAPACITY` events behind skips
/// the ones it missed.
#[derive(Debug, Clone)]
pub struct MemoryChannel {
    name: String,
    sender: broadcast::Sender<HotelEvent>,
}

impl MemoryChannel {
    pub fn new(name: impl Into<String>) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            name: name.into(),
            sender,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl EventChannel for MemoryChannel {
    async fn publish(&self, event: &HotelEvent) -> Result<()> {
        if self.sender.send(event.clone()).is_err() {
            tracing::trace!(
                queue = %self.name,
                hotel_id = %event.hotel_id,
                "No subscriber, event dropped"
            );
        }
        Ok(())
    }

    async fn subscribe(&self) -> Result<EventStream> {
        let queue = self.name.clone();
        let stream = BroadcastStream::new(self.sender.subscribe()).filter_map(move |item| {
            match item {
                Ok(event) => Some(Ok(event)),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(queue = %queue, skipped, "Event consumer lagged, events skipped");
                    None
                }
            }
        });
        Ok(Box::pin(stream))
    }
}

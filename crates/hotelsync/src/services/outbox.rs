//! Pending-event outbox and its relay.
//!
//! When a write has reached the entity store but a later stage failed, its
//! event is parked here. The relay keeps publishing parked events with
//! exponential backoff so the search role still converges.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex, Notify};

use hotelsync_core::events::{EventChannel, HotelEvent};

/// Backoff doubles per failed pass up to `base << MAX_BACKOFF_SHIFT`.
const MAX_BACKOFF_SHIFT: u32 = 6;

#[derive(Debug, Clone)]
struct PendingEvent {
    event: HotelEvent,
    attempts: u32,
}

/// Outcome of one relay pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayReport {
    pub published: usize,
    /// Events left in the outbox for a later pass.
    pub retrying: usize,
    /// Events dropped after exhausting their attempts.
    pub dropped: usize,
}

/// FIFO of events waiting to be published.
#[derive(Debug, Clone)]
pub struct Outbox {
    pending: Arc<Mutex<VecDeque<PendingEvent>>>,
    notify: Arc<Notify>,
    max_attempts: u32,
}

impl Outbox {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            pending: Arc::new(Mutex::new(VecDeque::new())),
            notify: Arc::new(Notify::new()),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Parks an event and wakes the relay.
    pub async fn enqueue(&self, event: HotelEvent) {
        tracing::debug!(
            hotel_id = %event.hotel_id,
            operation = %event.operation,
            version = event.version,
            "Event parked in outbox"
        );
        self.pending.lock().await.push_back(PendingEvent {
            event,
            attempts: 0,
        });
        self.notify.notify_one();
    }

    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Snapshot of the parked events, oldest first.
    pub async fn pending(&self) -> Vec<HotelEvent> {
        self.pending
            .lock()
            .await
            .iter()
            .map(|p| p.event.clone())
            .collect()
    }

    /// Publishes parked events in order until one fails.
    ///
    /// The failing event and everything behind it stay parked. An event that
    /// has failed `max_attempts` times is dropped and logged.
    pub async fn relay_once(&self, channel: &dyn EventChannel) -> RelayReport {
        let mut batch: VecDeque<PendingEvent> = std::mem::take(&mut *self.pending.lock().await);
        let mut report = RelayReport::default();

        while let Some(mut pending) = batch.pop_front() {
            match channel.publish(&pending.event).await {
                Ok(()) => {
                    report.published += 1;
                }
                Err(err) => {
                    pending.attempts += 1;
                    if pending.attempts >= self.max_attempts {
                        tracing::error!(
                            hotel_id = %pending.event.hotel_id,
                            operation = %pending.event.operation,
                            attempts = pending.attempts,
                            error = %err,
                            "Dropping outbox event after max attempts"
                        );
                        report.dropped += 1;
                    } else {
                        tracing::warn!(
                            hotel_id = %pending.event.hotel_id,
                            attempts = pending.attempts,
                            error = %err,
                            "Outbox publish failed, will retry"
                        );
                        batch.push_front(pending);
                    }
                    break;
                }
            }
        }

        report.retrying = batch.len();
        if !batch.is_empty() {
            let mut queue = self.pending.lock().await;
            // Events enqueued during the pass go behind the older ones.
            while let Some(pending) = batch.pop_back() {
                queue.push_front(pending);
            }
        }
        report
    }

    /// Runs relay passes until shutdown.
    ///
    /// Waits for an enqueue or `base_delay` between passes, and backs off
    /// exponentially while publishing keeps failing.
    pub async fn run_relay(
        self,
        channel: Arc<dyn EventChannel>,
        base_delay: Duration,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let mut failed_passes: u32 = 0;

        loop {
            let delay = backoff(base_delay, failed_passes);
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::debug!("Outbox relay shutting down");
                    break;
                }
                _ = self.notify.notified(), if failed_passes == 0 => {}
                _ = tokio::time::sleep(delay) => {}
            }

            let report = self.relay_once(channel.as_ref()).await;
            if report.published > 0 {
                tracing::debug!(published = report.published, "Outbox relay pass");
            }
            if report.retrying > 0 || report.dropped > 0 {
                failed_passes = failed_passes.saturating_add(1);
            } else {
                failed_passes = 0;
            }
        }
    }
}

fn backoff(base: Duration, failed_passes: u32) -> Duration {
    base.saturating_mul(1 << failed_passes.min(MAX_BACKOFF_SHIFT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hotelsync_core::events::{EventError, EventStream, Result as EventResult};
    use std::sync::atomic::{AtomicBool, Ordering};
    use uuid::Uuid;

    // Channel that records publishes and can be switched off
    struct FlakyChannel {
        published: Mutex<Vec<HotelEvent>>,
        down: AtomicBool,
    }

    impl FlakyChannel {
        fn new(down: bool) -> Self {
            Self {
                published: Mutex::new(Vec::new()),
                down: AtomicBool::new(down),
            }
        }
    }

    #[async_trait]
    impl EventChannel for FlakyChannel {
        async fn publish(&self, event: &HotelEvent) -> EventResult<()> {
            if self.down.load(Ordering::SeqCst) {
                return Err(EventError::Transport("broker down".to_string()));
            }
            self.published.lock().await.push(event.clone());
            Ok(())
        }

        async fn subscribe(&self) -> EventResult<EventStream> {
            Err(EventError::Closed)
        }
    }

    #[tokio::test]
    async fn test_relay_publishes_in_order() {
        let outbox = Outbox::new(5);
        let channel = FlakyChannel::new(false);
        let id = Uuid::new_v4();
        outbox.enqueue(HotelEvent::created(id, 1)).await;
        outbox.enqueue(HotelEvent::updated(id, 2)).await;

        let report = outbox.relay_once(&channel).await;

        assert_eq!(report.published, 2);
        assert_eq!(outbox.len().await, 0);
        let published = channel.published.lock().await;
        assert_eq!(published[0].version, 1);
        assert_eq!(published[1].version, 2);
    }

    #[tokio::test]
    async fn test_failed_pass_keeps_events_parked() {
        let outbox = Outbox::new(5);
        let channel = FlakyChannel::new(true);
        let id = Uuid::new_v4();
        outbox.enqueue(HotelEvent::created(id, 1)).await;
        outbox.enqueue(HotelEvent::updated(id, 2)).await;

        let report = outbox.relay_once(&channel).await;

        assert_eq!(report.published, 0);
        assert_eq!(report.retrying, 2);
        assert_eq!(
            outbox.pending().await,
            vec![HotelEvent::created(id, 1), HotelEvent::updated(id, 2)]
        );

        channel.down.store(false, Ordering::SeqCst);
        let report = outbox.relay_once(&channel).await;
        assert_eq!(report.published, 2);
        assert_eq!(outbox.len().await, 0);
    }

    #[tokio::test]
    async fn test_event_dropped_after_max_attempts() {
        let outbox = Outbox::new(2);
        let channel = FlakyChannel::new(true);
        outbox.enqueue(HotelEvent::deleted(Uuid::new_v4(), 3)).await;

        assert_eq!(outbox.relay_once(&channel).await.retrying, 1);
        let report = outbox.relay_once(&channel).await;

        assert_eq!(report.dropped, 1);
        assert_eq!(outbox.len().await, 0);
    }

    #[tokio::test]
    async fn test_run_relay_drains_and_stops_on_shutdown() {
        let outbox = Outbox::new(5);
        let channel = Arc::new(FlakyChannel::new(false));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let relay = tokio::spawn(outbox.clone().run_relay(
            channel.clone(),
            Duration::from_millis(10),
            shutdown_rx,
        ));
        outbox.enqueue(HotelEvent::created(Uuid::new_v4(), 1)).await;

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(channel.published.lock().await.len(), 1);

        shutdown_tx.send(()).unwrap();
        relay.await.unwrap();
    }

    #[test]
    fn test_backoff_is_capped() {
        let base = Duration::from_millis(100);
        assert_eq!(backoff(base, 0), base);
        assert_eq!(backoff(base, 3), Duration::from_millis(800));
        assert_eq!(backoff(base, 50), Duration::from_millis(6400));
    }
}

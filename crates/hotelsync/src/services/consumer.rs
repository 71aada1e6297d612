//! Event consumer of the search role.
//!
//! A single task takes events off the channel one at a time. Redeliveries
//! of an already reconciled `(hotel_id, operation, version)` are skipped,
//! and events that fail to reconcile are parked in a bounded dead-letter
//! queue from which they can be redriven.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use uuid::Uuid;

use hotelsync_core::events::{
    DeadLetter, EventChannel, EventStream, HotelEvent, Operation, RedriveReport,
    Result as EventResult,
};

use super::search::{Reconciliation, SearchService};

/// Delay before resubscribing after the channel failed.
const RESUBSCRIBE_DELAY: Duration = Duration::from_secs(1);

type DedupeKey = (Uuid, Operation, u64);

/// Bounded FIFO of events that failed to reconcile.
///
/// When full, the oldest letter is dropped to make room.
#[derive(Debug, Clone)]
pub struct DeadLetterQueue {
    letters: Arc<Mutex<VecDeque<DeadLetter>>>,
    capacity: usize,
}

impl DeadLetterQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            letters: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    pub async fn push(&self, letter: DeadLetter) {
        let mut letters = self.letters.lock().await;
        if letters.len() >= self.capacity {
            if let Some(dropped) = letters.pop_front() {
                tracing::error!(
                    hotel_id = %dropped.event.hotel_id,
                    operation = %dropped.event.operation,
                    reason = %dropped.reason,
                    "Dead-letter queue full, dropping oldest letter"
                );
            }
        }
        letters.push_back(letter);
    }

    /// Snapshot of the queue, oldest first.
    pub async fn list(&self) -> Vec<DeadLetter> {
        self.letters.lock().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.letters.lock().await.len()
    }

    async fn take_all(&self) -> Vec<DeadLetter> {
        self.letters.lock().await.drain(..).collect()
    }
}

/// Result of feeding one event to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reconciled(Reconciliation),
    Duplicate,
    DeadLettered,
}

/// Idempotent, sequential consumer feeding the [`SearchService`].
///
/// Clones share one worker lock, so the consumer task and a redrive never
/// reconcile concurrently.
#[derive(Clone)]
pub struct EventConsumer {
    search: SearchService,
    seen: Arc<Mutex<LruCache<DedupeKey, ()>>>,
    dead_letters: DeadLetterQueue,
    worker: Arc<Mutex<()>>,
}

impl EventConsumer {
    /// Creates a consumer remembering the last `dedupe_capacity` events.
    pub fn new(search: SearchService, dedupe_capacity: usize, dead_letters: DeadLetterQueue) -> Self {
        let capacity = NonZeroUsize::new(dedupe_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            search,
            seen: Arc::new(Mutex::new(LruCache::new(capacity))),
            dead_letters,
            worker: Arc::new(Mutex::new(())),
        }
    }

    pub fn dead_letters(&self) -> &DeadLetterQueue {
        &self.dead_letters
    }

    /// Reconciles one event unless it was already reconciled.
    ///
    /// Failures are logged and dead-lettered; nothing propagates.
    pub async fn process(&self, event: HotelEvent) -> Outcome {
        // Held from the dedupe check until the index commit
        let _worker = self.worker.lock().await;

        let key = event.dedupe_key();
        if self.seen.lock().await.contains(&key) {
            tracing::debug!(
                hotel_id = %event.hotel_id,
                operation = %event.operation,
                version = event.version,
                "Duplicate event skipped"
            );
            return Outcome::Duplicate;
        }

        match self.search.handle_event(&event).await {
            Ok(reconciliation) => {
                self.seen.lock().await.put(key, ());
                Outcome::Reconciled(reconciliation)
            }
            Err(err) => {
                tracing::warn!(
                    hotel_id = %event.hotel_id,
                    operation = %event.operation,
                    version = event.version,
                    error = %err,
                    "Reconciliation failed, dead-lettering event"
                );
                self.dead_letters
                    .push(DeadLetter::new(event, err.to_string()))
                    .await;
                Outcome::DeadLettered
            }
        }
    }

    /// Replays every dead letter once. Letters that fail again are parked
    /// again.
    pub async fn redrive(&self) -> RedriveReport {
        let letters = self.dead_letters.take_all().await;
        let mut report = RedriveReport {
            redriven: letters.len(),
            ..RedriveReport::default()
        };

        for letter in letters {
            match self.process(letter.event).await {
                Outcome::DeadLettered => report.failed += 1,
                Outcome::Reconciled(_) | Outcome::Duplicate => report.reconciled += 1,
            }
        }

        tracing::info!(
            redriven = report.redriven,
            reconciled = report.reconciled,
            failed = report.failed,
            "Dead letters redriven"
        );
        report
    }

    /// Subscribes to the channel and spawns the consumer task.
    ///
    /// The first subscription happens before this returns, so no event
    /// published afterwards is missed. If the channel later fails the task
    /// resubscribes until shutdown.
    pub async fn start(
        self,
        channel: Arc<dyn EventChannel>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> EventResult<JoinHandle<()>> {
        let mut stream = channel.subscribe().await?;

        Ok(tokio::spawn(async move {
            loop {
                if !self.consume(&mut stream, &mut shutdown).await {
                    break;
                }

                tokio::select! {
                    _ = shutdown.recv() => break,
                    _ = tokio::time::sleep(RESUBSCRIBE_DELAY) => {}
                }
                match channel.subscribe().await {
                    Ok(next) => {
                        tracing::info!("Event consumer resubscribed");
                        stream = next;
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "Event consumer failed to resubscribe");
                        stream = Box::pin(tokio_stream::empty::<EventResult<HotelEvent>>());
                    }
                }
            }
            tracing::debug!("Event consumer shutting down");
        }))
    }

    /// Drains the stream. Returns false on shutdown and true when the
    /// stream ended or failed.
    async fn consume(
        &self,
        stream: &mut EventStream,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> bool {
        loop {
            tokio::select! {
                _ = shutdown.recv() => return false,
                item = stream.next() => match item {
                    Some(Ok(event)) => {
                        self.process(event).await;
                    }
                    Some(Err(err)) if err.is_fatal() => {
                        tracing::error!(error = %err, "Event channel failed");
                        return true;
                    }
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "Skipping undecodable event");
                    }
                    None => {
                        tracing::warn!("Event stream ended");
                        return true;
                    }
                },
            }
        }
    }
}

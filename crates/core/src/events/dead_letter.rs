use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::HotelEvent;

/// An event the search role gave up on, kept for inspection and redrive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadLetter {
    pub event: HotelEvent,
    pub reason: String,
    pub failed_at: DateTime<Utc>,
}

impl DeadLetter {
    pub fn new(event: HotelEvent, reason: impl Into<String>) -> Self {
        Self {
            event,
            reason: reason.into(),
            failed_at: Utc::now(),
        }
    }
}

/// Outcome of replaying the dead-letter queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedriveReport {
    /// Events taken off the queue.
    pub redriven: usize,
    /// Events that reconciled this time.
    pub reconciled: usize,
    /// Events that failed again and went back on the queue.
    pub failed: usize,
}

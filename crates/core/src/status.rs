//! Health payloads shared by the server and the client.

use serde::{Deserialize, Serialize};

/// Body of `GET /healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    /// `hotels`, `search` or `all`.
    pub role: String,
    /// Events waiting in the hotels role's outbox.
    #[serde(default)]
    pub outbox_pending: usize,
    /// Events parked in the search role's dead-letter queue.
    #[serde(default)]
    pub dead_letters: usize,
}

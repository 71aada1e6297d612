use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EventError, Result};

/// The kind of change an event announces.
///
/// Anything other than the three known operations decodes to `Unknown`
/// rather than failing, so a newer producer cannot wedge an older consumer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operation {
    Create,
    Update,
    Delete,
    Unknown(String),
}

impl Operation {
    pub fn as_str(&self) -> &str {
        match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Unknown(other) => other,
        }
    }
}

impl From<String> for Operation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CREATE" => Operation::Create,
            "UPDATE" => Operation::Update,
            "DELETE" => Operation::Delete,
            _ => Operation::Unknown(value),
        }
    }
}

impl From<Operation> for String {
    fn from(value: Operation) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification that a hotel changed.
///
/// `version` is the store version the change produced. A delete carries the
/// version after the last update, so every logical operation on a hotel has
/// a distinct `(hotel_id, operation, version)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelEvent {
    pub operation: Operation,
    pub hotel_id: Uuid,
    #[serde(default)]
    pub version: u64,
}

impl HotelEvent {
    pub fn created(hotel_id: Uuid, version: u64) -> Self {
        Self {
            operation: Operation::Create,
            hotel_id,
            version,
        }
    }

    pub fn updated(hotel_id: Uuid, version: u64) -> Self {
        Self {
            operation: Operation::Update,
            hotel_id,
            version,
        }
    }

    pub fn deleted(hotel_id: Uuid, version: u64) -> Self {
        Self {
            operation: Operation::Delete,
            hotel_id,
            version,
        }
    }

    /// Identity used by idempotent consumers to drop redeliveries.
    pub fn dedupe_key(&self) -> (Uuid, Operation, u64) {
        (self.hotel_id, self.operation.clone(), self.version)
    }
}

/// Encodes an event as its JSON wire payload.
pub fn encode_event(event: &HotelEvent) -> Result<Vec<u8>> {
    serde_json::to_vec(event).map_err(|e| EventError::Encode(e.to_string()))
}

/// Decodes a JSON wire payload.
pub fn decode_event(bytes: &[u8]) -> Result<HotelEvent> {
    serde_json::from_slice(bytes).map_err(|e| EventError::Decode(e.to_string()))
}

/// Returns the broker key of the named queue.
pub fn queue_key(name: &str) -> String {
    format!("queue:{name}")
}

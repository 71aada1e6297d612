use thiserror::Error;

/// Errors that can occur on the event channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event transport failed: {0}")]
    Transport(String),
    #[error("Event encoding failed: {0}")]
    Encode(String),
    #[error("Event decoding failed: {0}")]
    Decode(String),
    #[error("Event channel closed")]
    Closed,
}

impl EventError {
    /// Returns true if the subscription cannot continue after this error.
    ///
    /// A single undecodable message is not fatal; the consumer skips it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EventError::Transport(_) | EventError::Closed)
    }
}

/// Result type for event channel operations.
pub type Result<T> = std::result::Result<T, EventError>;

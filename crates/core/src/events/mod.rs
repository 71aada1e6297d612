//! Change notifications between the hotels role and the search role.
//!
//! Events carry identity only. Consumers are expected to re-fetch the
//! canonical hotel instead of trusting anything in the message.

mod dead_letter;
mod error;
mod traits;
mod types;

pub use dead_letter::{DeadLetter, RedriveReport};
pub use error::{EventError, Result};
pub use traits::{EventChannel, EventStream};
pub use types::{decode_event, encode_event, queue_key, HotelEvent, Operation};

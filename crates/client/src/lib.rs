//! hotelsync_client - HTTP client and CLI for the hotelsync API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::HotelsyncClient;
pub use error::{ClientError, Result};

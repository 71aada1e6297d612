//! Search CLI commands.

use clap::{Parser, Subcommand};

use hotelsync_core::search::DEFAULT_SEARCH_LIMIT;

/// Search role commands.
#[derive(Debug, Parser)]
pub struct SearchCommand {
    #[command(subcommand)]
    pub action: SearchAction,
}

/// Available search actions.
#[derive(Debug, Subcommand)]
pub enum SearchAction {
    /// Search hotels by name.
    Query {
        /// Query text. Empty matches everything.
        #[arg(default_value = "")]
        q: String,
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// List dead-lettered events.
    DeadLetters,
    /// Replay all dead-lettered events.
    Redrive,
}

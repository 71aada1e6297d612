//! CLI command definitions.

pub mod health;
pub mod hotels;
pub mod reservations;
pub mod search;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the hotelsync API.
#[derive(Debug, Parser)]
#[command(name = "hotelsync-client")]
#[command(about = "CLI client for the hotelsync API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "HOTELSYNC_URL", default_value = "http://localhost:8081")]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Hotel management (hotels role).
    Hotels(hotels::HotelsCommand),
    /// Reservations and availability (hotels role).
    Reservations(reservations::ReservationsCommand),
    /// Search and dead letters (search role).
    Search(search::SearchCommand),
    /// Server health checks.
    Health(health::HealthCommand),
}

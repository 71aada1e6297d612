//! Reservation CLI commands.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Reservation commands.
#[derive(Debug, Parser)]
pub struct ReservationsCommand {
    #[command(subcommand)]
    pub action: ReservationsAction,
}

/// Available reservation actions.
#[derive(Debug, Subcommand)]
pub enum ReservationsAction {
    /// Book a stay.
    Create {
        #[arg(long)]
        hotel_id: Uuid,
        #[arg(long)]
        user_id: Uuid,
        /// Check-in (RFC 3339).
        #[arg(long)]
        check_in: DateTime<Utc>,
        /// Check-out (RFC 3339).
        #[arg(long)]
        check_out: DateTime<Utc>,
    },
    /// Cancel a reservation.
    Cancel {
        /// Reservation ID.
        id: Uuid,
    },
    /// List the reservations of a hotel.
    ListHotel {
        /// Hotel ID.
        hotel_id: Uuid,
    },
    /// List the reservations of a user.
    ListUser {
        /// User ID.
        user_id: Uuid,
        /// Only reservations at this hotel.
        #[arg(long)]
        hotel_id: Option<Uuid>,
    },
    /// Check room availability for a stay.
    Availability {
        /// Hotel ID, repeatable.
        #[arg(long = "hotel-id", required = true)]
        hotel_ids: Vec<Uuid>,
        #[arg(long)]
        check_in: DateTime<Utc>,
        #[arg(long)]
        check_out: DateTime<Utc>,
    },
}

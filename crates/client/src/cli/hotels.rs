//! Hotel CLI commands.

use chrono::NaiveTime;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use hotelsync_core::hotel::{HotelPatch, NewHotel};

/// Hotel management commands.
#[derive(Debug, Parser)]
pub struct HotelsCommand {
    #[command(subcommand)]
    pub action: HotelsAction,
}

/// Available hotel actions.
#[derive(Debug, Subcommand)]
pub enum HotelsAction {
    /// Get hotel by ID.
    Get {
        /// Hotel ID.
        id: Uuid,
    },
    /// Create a new hotel.
    Create(CreateHotelArgs),
    /// Update the given fields of a hotel.
    Update(UpdateHotelArgs),
    /// Delete hotel by ID.
    Delete {
        /// Hotel ID.
        id: Uuid,
    },
}

#[derive(Debug, Args)]
pub struct CreateHotelArgs {
    /// Hotel name.
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub city: String,
    #[arg(long, default_value = "")]
    pub state: String,
    #[arg(long, default_value = "")]
    pub country: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value_t = 0.0)]
    pub price_per_night: f64,
    /// Rating from 0 to 5.
    #[arg(long, default_value_t = 0.0)]
    pub rating: f64,
    #[arg(long, default_value_t = 0)]
    pub rooms: u32,
    /// Check-in time (HH:MM:SS).
    #[arg(long)]
    pub check_in_time: Option<NaiveTime>,
    /// Check-out time (HH:MM:SS).
    #[arg(long)]
    pub check_out_time: Option<NaiveTime>,
    /// Amenity, repeatable.
    #[arg(long = "amenity")]
    pub amenities: Vec<String>,
}

impl From<CreateHotelArgs> for NewHotel {
    fn from(args: CreateHotelArgs) -> Self {
        NewHotel {
            name: args.name,
            address: args.address,
            city: args.city,
            state: args.state,
            country: args.country,
            phone: args.phone,
            email: args.email,
            price_per_night: args.price_per_night,
            rating: args.rating,
            available_rooms: args.rooms,
            check_in_time: args.check_in_time,
            check_out_time: args.check_out_time,
            amenities: args.amenities,
        }
    }
}

#[derive(Debug, Args)]
pub struct UpdateHotelArgs {
    /// Hotel ID.
    pub id: Uuid,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub price_per_night: Option<f64>,
    #[arg(long)]
    pub rating: Option<f64>,
    #[arg(long)]
    pub rooms: Option<u32>,
    #[arg(long, conflicts_with = "clear_check_in_time")]
    pub check_in_time: Option<NaiveTime>,
    /// Remove the check-in time.
    #[arg(long)]
    pub clear_check_in_time: bool,
    #[arg(long, conflicts_with = "clear_check_out_time")]
    pub check_out_time: Option<NaiveTime>,
    /// Remove the check-out time.
    #[arg(long)]
    pub clear_check_out_time: bool,
    /// Replace the amenities, repeatable.
    #[arg(long = "amenity")]
    pub amenities: Option<Vec<String>>,
}

impl UpdateHotelArgs {
    /// Builds a patch holding only the flags that were given.
    pub fn to_patch(&self) -> HotelPatch {
        let time = |value: Option<NaiveTime>, clear: bool| {
            if clear {
                Some(None)
            } else {
                value.map(Some)
            }
        };

        HotelPatch {
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            price_per_night: self.price_per_night,
            rating: self.rating,
            available_rooms: self.rooms,
            check_in_time: time(self.check_in_time, self.clear_check_in_time),
            check_out_time: time(self.check_out_time, self.clear_check_out_time),
            amenities: self.amenities.clone(),
        }
    }
}

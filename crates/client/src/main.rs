//! hotelsync-client CLI entry point.

use clap::Parser;

use hotelsync_client::cli::health::HealthAction;
use hotelsync_client::cli::hotels::HotelsAction;
use hotelsync_client::cli::reservations::ReservationsAction;
use hotelsync_client::cli::search::SearchAction;
use hotelsync_client::cli::{Cli, Commands, OutputFormat};
use hotelsync_client::client::HotelsyncClient;
use hotelsync_client::output::{format_output, pretty};
use hotelsync_client::ClientError;
use hotelsync_core::hotel::{AvailabilityQuery, NewHotel, NewReservation};
use hotelsync_core::search::SearchQuery;

/// Prints `value` as JSON, or through the pretty formatter.
fn print<T: serde::Serialize>(value: &T, format: OutputFormat, pretty: impl Fn(&T) -> String) {
    match format {
        OutputFormat::Json => println!("{}", format_output(value, format)),
        OutputFormat::Pretty => println!("{}", pretty(value)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = HotelsyncClient::new(&cli.base_url);

    match cli.command {
        Commands::Hotels(cmd) => match cmd.action {
            HotelsAction::Get { id } => {
                let hotel = client.get_hotel(id).await?;
                print(&hotel, cli.format, pretty::format_hotel);
            }
            HotelsAction::Create(args) => {
                let hotel = client.create_hotel(&NewHotel::from(args)).await?;
                print(&hotel, cli.format, |h| {
                    format!("Created:\n{}", pretty::format_hotel(h))
                });
            }
            HotelsAction::Update(args) => {
                let patch = args.to_patch();
                if patch.is_empty() {
                    return Err(ClientError::InvalidInput(
                        "nothing to update, pass at least one field".to_string(),
                    )
                    .into());
                }
                let hotel = client.update_hotel(args.id, &patch).await?;
                print(&hotel, cli.format, |h| {
                    format!("Updated:\n{}", pretty::format_hotel(h))
                });
            }
            HotelsAction::Delete { id } => {
                client.delete_hotel(id).await?;
                if !cli.quiet {
                    println!("Deleted hotel {id}");
                }
            }
        },
        Commands::Reservations(cmd) => match cmd.action {
            ReservationsAction::Create {
                hotel_id,
                user_id,
                check_in,
                check_out,
            } => {
                let reservation = client
                    .create_reservation(&NewReservation {
                        hotel_id,
                        user_id,
                        check_in,
                        check_out,
                    })
                    .await?;
                print(&reservation, cli.format, |r| {
                    format!("Booked:\n{}", pretty::format_reservation(r))
                });
            }
            ReservationsAction::Cancel { id } => {
                client.cancel_reservation(id).await?;
                if !cli.quiet {
                    println!("Cancelled reservation {id}");
                }
            }
            ReservationsAction::ListHotel { hotel_id } => {
                let reservations = client.list_hotel_reservations(hotel_id).await?;
                print(&reservations, cli.format, |r| pretty::format_reservations(r));
            }
            ReservationsAction::ListUser { user_id, hotel_id } => {
                let reservations = client.list_user_reservations(user_id, hotel_id).await?;
                print(&reservations, cli.format, |r| pretty::format_reservations(r));
            }
            ReservationsAction::Availability {
                hotel_ids,
                check_in,
                check_out,
            } => {
                let query = AvailabilityQuery::new(hotel_ids, check_in, check_out)
                    .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
                let availability = client.availability(&query).await?;
                print(&availability, cli.format, pretty::format_availability);
            }
        },
        Commands::Search(cmd) => match cmd.action {
            SearchAction::Query { q, limit, offset } => {
                let hits = client.search(&SearchQuery { q, limit, offset }).await?;
                print(&hits, cli.format, |h| pretty::format_hits(h));
            }
            SearchAction::DeadLetters => {
                let letters = client.dead_letters().await?;
                print(&letters, cli.format, |l| pretty::format_dead_letters(l));
            }
            SearchAction::Redrive => {
                let report = client.redrive_dead_letters().await?;
                print(&report, cli.format, |r| {
                    format!(
                        "Redriven: {}  Reconciled: {}  Failed: {}",
                        r.redriven, r.reconciled, r.failed
                    )
                });
            }
        },
        Commands::Health(cmd) => match cmd.action {
            HealthAction::Live => {
                client.livez().await?;
                if !cli.quiet {
                    println!("ok");
                }
            }
            HealthAction::Status => {
                let report = client.healthz().await?;
                print(&report, cli.format, |r| {
                    format!(
                        "Status: {}\n  Role: {}\n  Outbox pending: {}\n  Dead letters: {}",
                        r.status, r.role, r.outbox_pending, r.dead_letters
                    )
                });
            }
        },
    }

    Ok(())
}

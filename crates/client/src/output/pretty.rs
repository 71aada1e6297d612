//! Pretty output formatting.

use std::collections::HashMap;

use uuid::Uuid;

use hotelsync_core::events::DeadLetter;
use hotelsync_core::hotel::{Hotel, Reservation};
use hotelsync_core::search::HotelSummary;

/// Format a hotel for display.
pub fn format_hotel(hotel: &Hotel) -> String {
    let mut output = format!(
        "{} (v{})\n  ID: {}\n  Location: {}",
        hotel.name,
        hotel.version,
        hotel.id,
        location(&hotel.city, &hotel.country)
    );
    output.push_str(&format!(
        "\n  Rating: {:.1}  Price: {:.2}  Rooms: {}",
        hotel.rating, hotel.price_per_night, hotel.available_rooms
    ));
    if !hotel.amenities.is_empty() {
        output.push_str(&format!("\n  Amenities: {}", hotel.amenities.join(", ")));
    }
    output
}

fn location(city: &str, country: &str) -> String {
    match (city.is_empty(), country.is_empty()) {
        (false, false) => format!("{city}, {country}"),
        (false, true) => city.to_string(),
        (true, false) => country.to_string(),
        (true, true) => "-".to_string(),
    }
}

/// Format a reservation for display.
pub fn format_reservation(reservation: &Reservation) -> String {
    format!(
        "{}\n  Hotel: {}\n  User: {}\n  Stay: {} -> {}",
        reservation.id,
        reservation.hotel_id,
        reservation.user_id,
        reservation.check_in,
        reservation.check_out
    )
}

/// Format reservations for display.
pub fn format_reservations(reservations: &[Reservation]) -> String {
    if reservations.is_empty() {
        return "No reservations found.".to_string();
    }
    let mut output = format!("RESERVATIONS ({})\n", reservations.len());
    output.push_str(&"-".repeat(40));
    for reservation in reservations {
        output.push_str(&format!("\n{}", format_reservation(reservation)));
        output.push('\n');
    }
    output
}

/// Format availability results, one hotel per line.
pub fn format_availability(availability: &HashMap<Uuid, bool>) -> String {
    let mut lines: Vec<String> = availability
        .iter()
        .map(|(id, free)| format!("{id}: {}", if *free { "available" } else { "full" }))
        .collect();
    lines.sort();
    lines.join("\n")
}

/// Format search hits for display.
pub fn format_hits(hits: &[HotelSummary]) -> String {
    if hits.is_empty() {
        return "No hotels found.".to_string();
    }
    let mut output = format!("HOTELS ({})\n", hits.len());
    output.push_str(&"-".repeat(40));
    for hit in hits {
        output.push_str(&format!(
            "\n{} [{:.1}]\n  ID: {}\n  Location: {}\n",
            hit.name,
            hit.rating,
            hit.id,
            location(&hit.city, &hit.country)
        ));
    }
    output
}

/// Format dead letters for display.
pub fn format_dead_letters(letters: &[DeadLetter]) -> String {
    if letters.is_empty() {
        return "No dead letters.".to_string();
    }
    let mut output = format!("DEAD LETTERS ({})\n", letters.len());
    output.push_str(&"-".repeat(40));
    for letter in letters {
        output.push_str(&format!(
            "\n{} {} v{}\n  At: {}\n  Reason: {}\n",
            letter.event.operation,
            letter.event.hotel_id,
            letter.event.version,
            letter.failed_at,
            letter.reason
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelsync_core::hotel::NewHotel;

    #[test]
    fn test_format_hotel() {
        let hotel = Hotel::from_new(
            Uuid::nil(),
            NewHotel::new("Plaza")
                .with_city("Lima")
                .with_amenities(["wifi", "pool"]),
        );

        let output = format_hotel(&hotel);

        assert!(output.starts_with("Plaza (v1)"));
        assert!(output.contains("Location: Lima"));
        assert!(output.contains("Amenities: wifi, pool"));
    }

    #[test]
    fn test_format_empty_lists() {
        assert_eq!(format_hits(&[]), "No hotels found.");
        assert_eq!(format_reservations(&[]), "No reservations found.");
        assert_eq!(format_dead_letters(&[]), "No dead letters.");
    }
}

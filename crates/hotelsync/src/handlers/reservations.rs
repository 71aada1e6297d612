//! Reservation and availability handlers.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use hotelsync_core::hotel::{AvailabilityQuery, NewReservation, Reservation};

use crate::{handlers::AppError, state::HotelsState};

/// Book a stay (POST /api/reservations).
pub async fn create_reservation(
    State(state): State<HotelsState>,
    payload: Result<Json<NewReservation>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(new) = payload?;
    let reservation = state.reservations.create(new).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Cancel a reservation (DELETE /api/reservations/{id}).
pub async fn cancel_reservation(
    State(state): State<HotelsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.reservations.cancel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/hotels/{id}/reservations
pub async fn list_hotel_reservations(
    State(state): State<HotelsState>,
    Path(hotel_id): Path<Uuid>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    Ok(Json(state.reservations.list_by_hotel(hotel_id).await?))
}

/// GET /api/users/{id}/reservations
pub async fn list_user_reservations(
    State(state): State<HotelsState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    Ok(Json(state.reservations.list_by_user(user_id).await?))
}

/// GET /api/users/{user_id}/hotels/{hotel_id}/reservations
pub async fn list_user_hotel_reservations(
    State(state): State<HotelsState>,
    Path((user_id, hotel_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    Ok(Json(
        state
            .reservations
            .list_by_user_and_hotel(user_id, hotel_id)
            .await?,
    ))
}

/// Free-room check for several hotels (GET /api/availability).
///
/// Query: `hotel_ids=a,b&check_in=<rfc3339>&check_out=<rfc3339>`.
pub async fn availability(
    State(state): State<HotelsState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<HashMap<Uuid, bool>>, AppError> {
    Ok(Json(state.reservations.availability(&query).await?))
}

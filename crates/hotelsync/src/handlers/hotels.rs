//! Hotel CRUD handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use hotelsync_core::hotel::{Hotel, HotelPatch, NewHotel};

use crate::{handlers::AppError, state::HotelsState};

/// Get a hotel by ID (GET /api/hotels/{id}).
pub async fn get_hotel(
    State(state): State<HotelsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Hotel>, AppError> {
    let hotel = state.hotels.get_by_id(id).await?;
    Ok(Json(hotel))
}

/// Create a hotel (POST /api/hotels).
pub async fn create_hotel(
    State(state): State<HotelsState>,
    payload: Result<Json<NewHotel>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(new_hotel) = payload?;
    let hotel = state.hotels.create(new_hotel).await?;
    Ok((StatusCode::CREATED, Json(hotel)))
}

/// Apply a sparse patch to a hotel (PUT /api/hotels/{id}).
pub async fn update_hotel(
    State(state): State<HotelsState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<HotelPatch>, JsonRejection>,
) -> Result<Json<Hotel>, AppError> {
    let Json(patch) = payload?;
    let hotel = state.hotels.update(id, patch).await?;
    Ok(Json(hotel))
}

/// Delete a hotel (DELETE /api/hotels/{id}).
pub async fn delete_hotel(
    State(state): State<HotelsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.hotels.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Search and dead-letter handlers.

use axum::{
    extract::{Query, State},
    Json,
};

use hotelsync_core::events::{DeadLetter, RedriveReport};
use hotelsync_core::search::{HotelSummary, SearchQuery};

use crate::{handlers::AppError, state::SearchState};

/// Name search over the index (GET /api/search).
pub async fn search_hotels(
    State(state): State<SearchState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<HotelSummary>>, AppError> {
    Ok(Json(state.search.search(&query).await?))
}

/// Events the consumer gave up on (GET /api/search/dead-letters).
pub async fn list_dead_letters(State(state): State<SearchState>) -> Json<Vec<DeadLetter>> {
    Json(state.consumer.dead_letters().list().await)
}

/// Replay every dead letter (POST /api/search/dead-letters/redrive).
pub async fn redrive_dead_letters(State(state): State<SearchState>) -> Json<RedriveReport> {
    Json(state.consumer.redrive().await)
}

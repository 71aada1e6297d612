use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{healthz, livez},
        hotels::{create_hotel, delete_hotel, get_hotel, update_hotel},
        reservations::{
            availability, cancel_reservation, create_reservation, list_hotel_reservations,
            list_user_hotel_reservations, list_user_reservations,
        },
        search::{list_dead_letters, redrive_dead_letters, search_hotels},
    },
    state::{AppState, HotelsState, SearchState},
};

/// Create the application router for the roles present in `state`.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let mut api_routes = Router::new();
    if let Some(hotels) = state.hotels.clone() {
        api_routes = api_routes.merge(hotel_routes().with_state(hotels));
    }
    if let Some(search) = state.search.clone() {
        api_routes = api_routes.merge(search_routes().with_state(search));
    }

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes.layer(cors))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

fn hotel_routes() -> Router<HotelsState> {
    Router::new()
        .route("/hotels", post(create_hotel))
        .route(
            "/hotels/{id}",
            get(get_hotel).put(update_hotel).delete(delete_hotel),
        )
        .route("/hotels/{id}/reservations", get(list_hotel_reservations))
        .route("/reservations", post(create_reservation))
        .route("/reservations/{id}", delete(cancel_reservation))
        .route("/users/{user_id}/reservations", get(list_user_reservations))
        .route(
            "/users/{user_id}/hotels/{hotel_id}/reservations",
            get(list_user_hotel_reservations),
        )
        .route("/availability", get(availability))
}

fn search_routes() -> Router<SearchState> {
    Router::new()
        .route("/search", get(search_hotels))
        .route("/search/dead-letters", get(list_dead_letters))
        .route("/search/dead-letters/redrive", post(redrive_dead_letters))
}

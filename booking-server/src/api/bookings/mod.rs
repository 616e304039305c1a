//! Booking API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/establishments/{id}/bookings",
            post(handler::create),
        )
        .route("/api/bookings", get(handler::list))
        .route("/api/bookings/{id}", get(handler::get_by_id))
        .route("/api/bookings/{id}/action", post(handler::action))
}

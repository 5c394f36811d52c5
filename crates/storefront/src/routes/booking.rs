use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, StorefrontState};

pub fn routes() -> Router<Arc<StorefrontState>> {
    Router::new()
        .route("/api/quote", post(handlers::booking::quote))
        .route("/api/bookings", post(handlers::booking::submit_booking))
        .route(
            "/api/bookings/:booking_number",
            get(handlers::booking::lookup_booking),
        )
}

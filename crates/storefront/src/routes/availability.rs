use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, StorefrontState};

pub fn routes() -> Router<Arc<StorefrontState>> {
    Router::new()
        .route(
            "/api/themes/:theme_id/slots",
            get(handlers::availability::get_slots),
        )
        .route(
            "/api/themes/:theme_id/dates",
            get(handlers::availability::get_dates),
        )
}

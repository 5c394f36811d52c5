use axum::{
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, StorefrontState};

pub fn routes() -> Router<Arc<StorefrontState>> {
    Router::new()
        .route("/api/holds", post(handlers::hold::create_hold))
        .route("/api/holds/:hold_id", delete(handlers::hold::release_hold))
}

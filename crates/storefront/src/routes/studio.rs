use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, StorefrontState};

pub fn routes() -> Router<Arc<StorefrontState>> {
    Router::new().route("/api/studio", get(handlers::studio::get_studio))
}

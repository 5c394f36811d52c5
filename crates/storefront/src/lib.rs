//! # studiobook storefront
//!
//! The HTTP service the booking widget talks to. Each request is scoped to
//! one studio (see [`middleware::tenant`]); configuration is fetched from the
//! backend API through [`studiobook_client::StudioBackend`], the calculator in
//! `studiobook-core` runs locally, and bookings, holds and coupon checks are
//! forwarded to the backend, which has the final word.
//!
//! ## Architecture
//!
//! - **Routes**: endpoint paths
//! - **Handlers**: request processing
//! - **Middleware**: tenant extraction and error mapping
//! - **Config**: environment settings

/// Configuration module for storefront settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Tenant extraction and error handling
pub mod middleware;
/// Route definitions
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use eyre::{Result, WrapErr};
use studiobook_client::StudioBackend;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::config::StorefrontConfig;

/// Source of the current time, replaceable in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Shared, immutable application state.
pub struct StorefrontState {
    /// Backend API handle
    pub backend: Arc<dyn StudioBackend>,
    pub config: StorefrontConfig,
    clock: Clock,
}

impl StorefrontState {
    pub fn new(backend: Arc<dyn StudioBackend>, config: StorefrontConfig) -> Self {
        Self {
            backend,
            config,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

/// Builds the router with every storefront route and the CORS and timeout
/// layers from `state.config`.
///
/// # Errors
///
/// Fails when a configured CORS origin is not a valid header value.
pub fn app(state: Arc<StorefrontState>) -> Result<Router> {
    let config = state.config.clone();

    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Studio profile and catalog
        .merge(routes::studio::routes())
        // Slots and date summaries
        .merge(routes::availability::routes())
        // Quotes, bookings and lookups
        .merge(routes::booking::routes())
        // Cart holds
        .merge(routes::hold::routes())
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<axum::http::HeaderValue>, _>>()
            .wrap_err("Invalid STOREFRONT_CORS_ORIGINS entry")?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
                axum::http::HeaderName::from_static(middleware::tenant::BOOKING_STATE_HEADER),
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Request tracing and timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .layer(tower_http::timeout::TimeoutLayer::new(
                std::time::Duration::from_secs(config.request_timeout),
            )),
    );

    Ok(app)
}

/// Starts the storefront server.
///
/// Initializes logging at `config.log_level`, builds the router and serves
/// until the listener fails.
pub async fn start_server(config: StorefrontConfig, backend: Arc<dyn StudioBackend>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let addr = config.server_addr();
    let state = Arc::new(StorefrontState::new(backend, config));
    let app = app(state)?;

    // Start the HTTP server
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;
    info!("Storefront listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

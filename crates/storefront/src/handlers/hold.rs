use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use studiobook_core::{
    hold::CartHold,
    models::{booking::HoldRequest, schedule::TimeOfDay},
};
use tracing::info;

use super::{load, session_end};
use crate::{
    middleware::{error_handling::AppError, tenant::Tenant},
    StorefrontState,
};

#[derive(Debug, Deserialize)]
pub struct CreateHoldRequest {
    pub theme_id: String,
    pub booking_date: NaiveDate,
    pub start_time: TimeOfDay,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HoldResponse {
    pub hold: CartHold,
    /// Seconds until the hold lapses, for the widget's countdown
    pub remaining_seconds: i64,
}

/// Reserves a slot while the customer fills in their details.
#[axum::debug_handler(state = Arc<StorefrontState>)]
pub async fn create_hold(
    State(state): State<Arc<StorefrontState>>,
    tenant: Tenant,
    Json(request): Json<CreateHoldRequest>,
) -> Result<(StatusCode, Json<HoldResponse>), AppError> {
    let catalog = load(&state, &tenant).await?;
    let theme = catalog.theme(&request.theme_id)?;
    let end_time = session_end(theme, request.start_time)?;
    catalog.offered_slot(
        &request.theme_id,
        request.booking_date,
        request.start_time,
        state.now(),
    )?;

    let hold = state
        .backend
        .create_hold(&HoldRequest {
            studio_slug: tenant.slug().to_string(),
            theme_id: request.theme_id,
            booking_date: request.booking_date,
            start_time: request.start_time,
            end_time,
        })
        .await?;

    info!(studio = %tenant.slug(), hold = %hold.id, expires_at = %hold.expires_at, "Hold created");

    let remaining_seconds = hold.remaining(state.now()).num_seconds();
    Ok((
        StatusCode::CREATED,
        Json(HoldResponse {
            hold,
            remaining_seconds,
        }),
    ))
}

/// Releases a hold. The backend only releases holds of the requesting studio.
#[axum::debug_handler(state = Arc<StorefrontState>)]
pub async fn release_hold(
    State(state): State<Arc<StorefrontState>>,
    tenant: Tenant,
    Path(hold_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.backend.release_hold(tenant.slug(), &hold_id).await?;
    info!(studio = %tenant.slug(), hold = %hold_id, "Hold released");
    Ok(StatusCode::NO_CONTENT)
}

//! # Availability Handlers
//!
//! Slots for one theme on one date, and per-date summaries for the calendar.
//!
//! Slots come from the backend, which accounts for existing bookings and
//! holds. When the backend's slot endpoint fails and local fallback is
//! enabled, slots are computed from the studio's schedule instead and
//! flagged `"source": "local"`: they may still be taken by bookings the
//! storefront cannot see.
//!
//! Date summaries are always computed locally from the schedule.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use studiobook_core::{
    availability::summarize_range,
    errors::BookingError,
    models::time_slot::{DateSlotInfo, TimeSlot},
};
use tracing::warn;

use super::load;
use crate::{
    middleware::{error_handling::AppError, tenant::Tenant},
    StorefrontState,
};

/// Span of the calendar when the widget does not ask for an end date.
pub const DEFAULT_CALENDAR_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSource {
    Backend,
    Local,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub theme_id: String,
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub source: SlotSource,
}

#[derive(Debug, Deserialize)]
pub struct DatesQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatesResponse {
    pub theme_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub dates: Vec<DateSlotInfo>,
}

#[axum::debug_handler(state = Arc<StorefrontState>)]
pub async fn get_slots(
    State(state): State<Arc<StorefrontState>>,
    tenant: Tenant,
    Path(theme_id): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let date = query
        .date
        .ok_or_else(|| BookingError::validation("date", "Pick a date first"))?;

    let (slots, source) = match state.backend.get_slots(tenant.slug(), &theme_id, date).await {
        Ok(slots) => (slots, SlotSource::Backend),
        Err(BookingError::Backend(err)) if state.config.local_slot_fallback => {
            warn!(
                studio = %tenant.slug(),
                theme = %theme_id,
                %date,
                error = %err,
                "Slot endpoint failed, computing slots locally"
            );
            let catalog = match load(&state, &tenant).await {
                Ok(catalog) => catalog,
                Err(_) => return Err(BookingError::Backend(err).into()),
            };
            let slots = catalog.slots(&theme_id, date, &[], state.now())?;
            (slots, SlotSource::Local)
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Json(SlotsResponse {
        theme_id,
        date,
        slots,
        source,
    }))
}

#[axum::debug_handler(state = Arc<StorefrontState>)]
pub async fn get_dates(
    State(state): State<Arc<StorefrontState>>,
    tenant: Tenant,
    Path(theme_id): Path<String>,
    Query(query): Query<DatesQuery>,
) -> Result<Json<DatesResponse>, AppError> {
    let catalog = load(&state, &tenant).await?;
    let theme = catalog.theme(&theme_id)?;
    let now = state.now();
    let tz = catalog.studio.tz();

    let from = query.from.unwrap_or_else(|| catalog.studio.today(now));
    let to = query
        .to
        .unwrap_or_else(|| from + Duration::days(DEFAULT_CALENDAR_DAYS));

    let dates = summarize_range(&catalog.availability(), theme, from, to, now, tz)?;

    Ok(Json(DatesResponse {
        theme_id,
        from,
        to,
        dates,
    }))
}

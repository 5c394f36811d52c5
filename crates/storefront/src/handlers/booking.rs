//! # Booking Handlers
//!
//! Quotes are computed locally so the widget can show a running total.
//! Submissions are validated locally, re-quoted and forwarded to the backend,
//! whose figures are authoritative; a mismatch is logged and reported in
//! `totals_match` rather than rejected.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use studiobook_core::{
    catalog::{Catalog, Selection},
    currency::format_price,
    errors::{BookingError, BookingResult},
    hold::ensure_unexpired,
    models::{
        booking::{Booking, BookingRequest},
        coupon::{Coupon, CouponValidationRequest},
        schedule::TimeOfDay,
    },
    pricing::resolve_price,
    totals::BookingTotals,
};
use tracing::{info, warn};

use super::{load, session_end};
use crate::{
    middleware::{error_handling::AppError, tenant::Tenant},
    StorefrontState,
};

const MIN_PHONE_DIGITS: usize = 9;
const MAX_PHONE_DIGITS: usize = 15;

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(flatten)]
    pub selection: Selection,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

/// Totals formatted for display, e.g. `"RM 120.00"`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DisplayTotals {
    pub base_price: String,
    pub extra_pax_fee: String,
    pub addons_total: String,
    pub discount_amount: String,
    pub total_amount: String,
    pub deposit_amount: String,
    pub balance_amount: String,
}

impl From<&BookingTotals> for DisplayTotals {
    fn from(totals: &BookingTotals) -> Self {
        Self {
            base_price: format_price(totals.base_price),
            extra_pax_fee: format_price(totals.extra_pax_fee),
            addons_total: format_price(totals.addons_total),
            discount_amount: format_price(totals.discount_amount),
            total_amount: format_price(totals.total_amount),
            deposit_amount: format_price(totals.deposit_amount),
            balance_amount: format_price(totals.balance_amount),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub totals: BookingTotals,
    pub end_time: TimeOfDay,
    pub is_special_pricing: bool,
    pub special_pricing_label: Option<String>,
    pub display: DisplayTotals,
}

#[derive(Debug, Deserialize)]
pub struct SubmitBookingRequest {
    #[serde(flatten)]
    pub booking: BookingRequest,
    /// Expiry of the hold the widget is submitting under, if any
    #[serde(default)]
    pub hold_expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking: Booking,
    pub local_totals: BookingTotals,
    pub totals_match: bool,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub phone: String,
}

/// Validates `code` with the backend and checks it against the studio's
/// calendar. Blank codes mean no coupon.
async fn resolve_coupon(
    state: &StorefrontState,
    tenant: &Tenant,
    code: Option<&str>,
    today: NaiveDate,
) -> BookingResult<Option<Coupon>> {
    let Some(code) = code.map(str::trim).filter(|code| !code.is_empty()) else {
        return Ok(None);
    };

    let coupon = state
        .backend
        .validate_coupon(&CouponValidationRequest {
            studio_slug: tenant.slug().to_string(),
            code: code.to_uppercase(),
        })
        .await?;
    coupon.check_applicable(today)?;
    Ok(Some(coupon))
}

fn quote_response(catalog: &Catalog, selection: &Selection, totals: BookingTotals) -> BookingResult<QuoteResponse> {
    let theme = catalog.theme(&selection.theme_id)?;
    let price = resolve_price(&catalog.pricing_rules, theme, selection.booking_date);

    Ok(QuoteResponse {
        end_time: session_end(theme, selection.start_time)?,
        is_special_pricing: price.is_special_pricing,
        special_pricing_label: price.label,
        display: DisplayTotals::from(&totals),
        totals,
    })
}

/// Price breakdown for the widget's current selection.
#[axum::debug_handler(state = Arc<StorefrontState>)]
pub async fn quote(
    State(state): State<Arc<StorefrontState>>,
    tenant: Tenant,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let catalog = load(&state, &tenant).await?;
    let today = catalog.studio.today(state.now());
    let coupon = resolve_coupon(&state, &tenant, request.coupon_code.as_deref(), today).await?;

    let totals = catalog.quote(&request.selection, coupon.as_ref())?;
    Ok(Json(quote_response(&catalog, &request.selection, totals)?))
}

fn validate_customer(request: &BookingRequest) -> BookingResult<()> {
    if !request.consent_tc {
        return Err(BookingError::validation(
            "consent_tc",
            "Please accept the terms and conditions",
        ));
    }
    if request.customer_name.trim().is_empty() {
        return Err(BookingError::validation("customer_name", "Name is required"));
    }

    let digits = request
        .customer_phone
        .chars()
        .filter(char::is_ascii_digit)
        .count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(BookingError::validation(
            "customer_phone",
            "Enter a valid phone number",
        ));
    }

    let email = request.customer_email.trim();
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email {
        return Err(BookingError::validation(
            "customer_email",
            "Enter a valid email address",
        ));
    }

    Ok(())
}

/// Validates and forwards a booking. The requested start must be one the
/// studio's schedule currently offers. Responds `201 Created` with the
/// backend's booking and the local breakdown.
#[axum::debug_handler(state = Arc<StorefrontState>)]
pub async fn submit_booking(
    State(state): State<Arc<StorefrontState>>,
    tenant: Tenant,
    Json(request): Json<SubmitBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let now = state.now();
    let SubmitBookingRequest {
        booking: request,
        hold_expires_at,
    } = request;

    validate_customer(&request)?;
    if let Some(expires_at) = hold_expires_at {
        ensure_unexpired(expires_at, now)?;
    }

    let catalog = load(&state, &tenant).await?;
    let theme = catalog.theme(&request.theme_id)?;
    if session_end(theme, request.start_time)? != request.end_time {
        return Err(BookingError::validation(
            "end_time",
            "End time does not match the session length",
        )
        .into());
    }
    catalog.offered_slot(&request.theme_id, request.booking_date, request.start_time, now)?;

    let today = catalog.studio.today(now);
    let coupon = resolve_coupon(&state, &tenant, request.coupon_code.as_deref(), today).await?;
    let selection = Selection {
        theme_id: request.theme_id.clone(),
        booking_date: request.booking_date,
        start_time: request.start_time,
        pax_count: request.pax_count,
        selected_addons: request.selected_addons.clone(),
    };
    let local_totals = catalog.quote(&selection, coupon.as_ref())?;

    let booking = state.backend.create_booking(tenant.slug(), &request).await?;
    let totals_match = booking.matches_totals(&local_totals);
    if !totals_match {
        warn!(
            studio = %tenant.slug(),
            booking = %booking.booking_number,
            local_total = local_totals.total_amount,
            backend_total = booking.total_amount,
            "Backend totals differ from local quote"
        );
    }

    info!(
        studio = %tenant.slug(),
        booking = %booking.booking_number,
        date = %booking.booking_date,
        "Booking created"
    );

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            booking,
            local_totals,
            totals_match,
        }),
    ))
}

/// Looks up a booking by number and phone. Bookings of other studios are
/// reported as not found.
#[axum::debug_handler(state = Arc<StorefrontState>)]
pub async fn lookup_booking(
    State(state): State<Arc<StorefrontState>>,
    tenant: Tenant,
    Path(booking_number): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Booking>, AppError> {
    let phone = query.phone.trim();
    if phone.is_empty() {
        return Err(BookingError::validation("phone", "Phone number is required").into());
    }

    let (studio, booking) = tokio::try_join!(
        state.backend.get_studio(tenant.slug()),
        state.backend.get_booking(&booking_number, phone),
    )?;

    if booking.studio_id != studio.id {
        return Err(BookingError::NotFound(format!("Booking {booking_number}")).into());
    }
    Ok(Json(booking))
}

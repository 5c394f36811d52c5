#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{from_value, json, Value};
use studiobook_client::mock::MockStudioBackend;
use studiobook_core::{
    hold::CartHold,
    models::{
        booking::Booking,
        coupon::Coupon,
        schedule::{BlackoutDate, WorkingHours},
        studio::Studio,
        theme::{Addon, Theme},
    },
};
use studiobook_storefront::{app, config::StorefrontConfig, StorefrontState};

pub const STUDIO: &str = "najiahstudio";
pub const MONDAY: &str = "2025-11-03";

pub const HOST: HeaderName = header::HOST;

/// Saturday 1 November 2025, 16:00 in Kuala Lumpur.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 1, 8, 0, 0).unwrap()
}

pub fn localhost() -> HeaderValue {
    HeaderValue::from_static("localhost:3000")
}

pub fn studio_json() -> Value {
    json!({
        "id": "studio-001",
        "slug": STUDIO,
        "name": "Najiah Photography",
        "timezone": "Asia/Kuala_Lumpur",
        "currency": "MYR",
        "status": "active",
        "settings": {},
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    })
}

pub fn studio() -> Studio {
    from_value(studio_json()).unwrap()
}

pub fn theme() -> Theme {
    from_value(json!({
        "id": "theme-001",
        "name": "Keluarga Bahagia",
        "base_price": 18000,
        "base_pax": 5,
        "extra_pax_price": 3000,
        "duration_minutes": 30,
        "status": "active",
        "sort_order": 1
    }))
    .unwrap()
}

pub fn addons() -> Vec<Addon> {
    from_value(json!([
        { "id": "addon-001", "name": "Extra prints", "price": 5000, "max_quantity": 2, "status": "active" },
        { "id": "addon-002", "name": "Frame", "price": 2500, "status": "inactive" }
    ]))
    .unwrap()
}

/// Monday to Friday, 09:00 to 12:00.
pub fn working_hours() -> Vec<WorkingHours> {
    (1..=5)
        .map(|day| {
            from_value(json!({
                "id": format!("wh-{day}"),
                "day_of_week": day,
                "active": true,
                "start": "09:00",
                "end": "12:00"
            }))
            .unwrap()
        })
        .collect()
}

pub fn coupon() -> Coupon {
    from_value(json!({
        "id": "coupon-1",
        "code": "EARLYBIRD",
        "type": "percentage",
        "value": 10,
        "status": "active"
    }))
    .unwrap()
}

pub fn booking_json(studio_id: &str) -> Value {
    json!({
        "id": "booking-1",
        "studio_id": studio_id,
        "booking_number": "BK-20251103-001",
        "theme_id": "theme-001",
        "booking_date": MONDAY,
        "start_time": "09:00",
        "end_time": "09:30",
        "pax_count": 5,
        "customer_name": "Aina",
        "customer_phone": "0123456789",
        "customer_email": "aina@example.com",
        "consent_tc": true,
        "consent_marketing": false,
        "base_price": 18000,
        "extra_pax_fee": 0,
        "addons_total": 0,
        "total_amount": 18000,
        "deposit_amount": 9000,
        "balance_amount": 9000,
        "payment_status": "pending",
        "booking_status": "confirmed",
        "created_at": "2025-11-01T08:00:00Z",
        "updated_at": "2025-11-01T08:00:00Z"
    })
}

pub fn booking(studio_id: &str) -> Booking {
    from_value(booking_json(studio_id)).unwrap()
}

pub fn hold() -> CartHold {
    from_value(json!({
        "id": "hold-1",
        "theme_id": "theme-001",
        "booking_date": MONDAY,
        "start_time": "09:00",
        "end_time": "09:30",
        "created_at": "2025-11-01T08:00:00Z",
        "expires_at": "2025-11-01T08:10:00Z"
    }))
    .unwrap()
}

pub fn blackout(date: &str) -> BlackoutDate {
    from_value(json!({
        "id": "blackout-1",
        "title": "Deepavali",
        "start_date": date,
        "reason": "Public holiday"
    }))
    .unwrap()
}

/// Answers every catalog fetch for the test studio.
pub fn with_catalog(backend: &mut MockStudioBackend) {
    with_catalog_and_blackouts(backend, Vec::new());
}

pub fn with_catalog_and_blackouts(backend: &mut MockStudioBackend, blackouts: Vec<BlackoutDate>) {
    backend.expect_get_studio().returning(|_| Ok(studio()));
    backend.expect_get_themes().returning(|_| Ok(vec![theme()]));
    backend.expect_get_addons().returning(|_| Ok(addons()));
    backend
        .expect_get_working_hours()
        .returning(|_| Ok(working_hours()));
    backend.expect_get_break_times().returning(|_| Ok(Vec::new()));
    backend
        .expect_get_blackout_dates()
        .returning(move |_| Ok(blackouts.clone()));
    backend
        .expect_get_pricing_rules()
        .returning(|_| Ok(Vec::new()));
}

pub fn server_with(backend: MockStudioBackend, config: StorefrontConfig) -> TestServer {
    let state = StorefrontState::new(Arc::new(backend), config).with_clock(Arc::new(now));
    TestServer::new(app(Arc::new(state)).unwrap()).unwrap()
}

pub fn server(backend: MockStudioBackend) -> TestServer {
    server_with(backend, StorefrontConfig::default())
}

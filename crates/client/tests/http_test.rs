mod common;

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::NaiveDate;
use common::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use studiobook_client::StudioBackend;
use studiobook_core::{
    errors::BookingError,
    models::{
        booking::BookingRequest,
        coupon::{CouponKind, CouponValidationRequest},
        time_slot::SlotStatus,
    },
};

fn booking_request() -> BookingRequest {
    BookingRequest {
        theme_id: "theme-001".to_string(),
        booking_date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
        start_time: "09:00".parse().unwrap(),
        end_time: "09:30".parse().unwrap(),
        pax_count: 5,
        customer_name: "Aina".to_string(),
        customer_phone: "0123456789".to_string(),
        customer_email: "aina@example.com".to_string(),
        customer_notes: None,
        consent_tc: true,
        consent_marketing: false,
        selected_addons: Vec::new(),
        coupon_code: None,
        hold_id: None,
    }
}

/// Counts hits and answers the first `failures` of them with `status`.
fn flaky(hits: Arc<AtomicUsize>, failures: usize, status: StatusCode, data: Value) -> Router {
    let handler = move || {
        let hits = hits.clone();
        let data = data.clone();
        async move {
            if hits.fetch_add(1, Ordering::SeqCst) < failures {
                (status, Json(json!({ "success": false, "message": "try later" })))
            } else {
                (StatusCode::OK, Json(ok(data)))
            }
        }
    };
    Router::new()
        .route("/studio/najiahstudio", get(handler.clone()))
        .route("/bookings", post(handler))
}

#[test_log::test(tokio::test)]
async fn test_get_studio_decodes_envelope() {
    let url = serve(Router::new().route(
        "/studio/najiahstudio",
        get(|| async { Json(ok(studio_json())) }),
    ))
    .await;

    let studio = backend(&url).get_studio("najiahstudio").await.unwrap();

    assert_eq!(studio.slug, "najiahstudio");
    assert_eq!(studio.settings.deposit_percentage, 30);
    assert_eq!(studio.settings.cart_hold_duration, 10);
}

#[tokio::test]
async fn test_unknown_studio_is_tenant_not_found() {
    let url = serve(Router::new()).await;

    let err = backend(&url).get_studio("ghoststudio").await.unwrap_err();

    assert!(matches!(err, BookingError::TenantNotFound(slug) if slug == "ghoststudio"));
}

#[test_log::test(tokio::test)]
async fn test_get_is_retried_once_after_server_error() {
    let hits = Arc::new(AtomicUsize::new(0));
    let url = serve(flaky(hits.clone(), 1, StatusCode::SERVICE_UNAVAILABLE, studio_json())).await;

    let studio = backend(&url).get_studio("najiahstudio").await;

    assert!(studio.is_ok());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_get_gives_up_after_one_retry() {
    let hits = Arc::new(AtomicUsize::new(0));
    let url = serve(flaky(hits.clone(), 5, StatusCode::INTERNAL_SERVER_ERROR, studio_json())).await;

    let err = backend(&url).get_studio("najiahstudio").await.unwrap_err();

    assert!(matches!(err, BookingError::Backend(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_post_is_not_retried_after_server_error() {
    let hits = Arc::new(AtomicUsize::new(0));
    let url = serve(flaky(hits.clone(), 1, StatusCode::BAD_GATEWAY, booking_json())).await;

    let err = backend(&url)
        .create_booking("najiahstudio", &booking_request())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Backend(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unreachable_backend_is_backend_error() {
    let url = dead_url().await;

    let err = backend(&url).get_themes("najiahstudio").await.unwrap_err();

    assert!(matches!(err, BookingError::Backend(_)));
}

#[rstest]
#[case(StatusCode::CONFLICT, json!({ "message": "Slot taken" }), "slot")]
#[case(StatusCode::UNPROCESSABLE_ENTITY, json!({ "message": "Too many people", "field": "pax_count" }), "pax_count")]
#[case(StatusCode::BAD_REQUEST, json!({ "message": "Bad phone" }), "request")]
#[case(StatusCode::NOT_FOUND, json!({ "message": "No such theme" }), "not_found")]
#[tokio::test]
async fn test_booking_rejections_map_to_domain_errors(
    #[case] status: StatusCode,
    #[case] body: Value,
    #[case] expected: &str,
) {
    let url = serve(Router::new().route(
        "/bookings",
        post(move || async move { (status, Json(body)) }),
    ))
    .await;

    let err = backend(&url)
        .create_booking("najiahstudio", &booking_request())
        .await
        .unwrap_err();

    match expected {
        "slot" => assert!(matches!(err, BookingError::SlotUnavailable(ref m) if m == "Slot taken")),
        "not_found" => assert!(matches!(err, BookingError::NotFound(_))),
        field => assert_eq!(err.field(), Some(field)),
    }
}

#[tokio::test]
async fn test_create_booking_sends_studio_slug() {
    let url = serve(Router::new().route(
        "/bookings",
        post(|Json(body): Json<Value>| async move {
            if body["studio_slug"] == "najiahstudio" && body["theme_id"] == "theme-001" {
                (StatusCode::OK, Json(ok(booking_json())))
            } else {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": "missing studio" })))
            }
        }),
    ))
    .await;

    let booking = backend(&url)
        .create_booking("najiahstudio", &booking_request())
        .await
        .unwrap();

    assert_eq!(booking.booking_number, "BK-20251103-001");
}

#[tokio::test]
async fn test_get_slots_passes_date() {
    let url = serve(Router::new().route(
        "/studio/:slug/themes/:theme_id/slots",
        get(
            |Path((slug, theme_id)): Path<(String, String)>,
             Query(query): Query<HashMap<String, String>>| async move {
                assert_eq!(slug, "najiahstudio");
                assert_eq!(theme_id, "theme-001");
                let status = if query.get("date").map(String::as_str) == Some("2025-11-03") {
                    "available"
                } else {
                    "booked"
                };
                Json(ok(json!([{
                    "start": "09:00",
                    "end": "09:30",
                    "status": status,
                    "price": 180,
                    "is_special_pricing": false
                }])))
            },
        ),
    ))
    .await;

    let slots = backend(&url)
        .get_slots("najiahstudio", "theme-001", NaiveDate::from_ymd_opt(2025, 11, 3).unwrap())
        .await
        .unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].status, SlotStatus::Available);
}

#[tokio::test]
async fn test_get_booking_passes_phone() {
    let url = serve(Router::new().route(
        "/bookings/:number",
        get(
            |Path(number): Path<String>, Query(query): Query<HashMap<String, String>>| async move {
                if number == "BK-20251103-001" && query.get("phone").map(String::as_str) == Some("0123456789") {
                    (StatusCode::OK, Json(ok(booking_json())))
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({ "message": "Booking not found" })))
                }
            },
        ),
    ))
    .await;
    let backend = backend(&url);

    assert!(backend.get_booking("BK-20251103-001", "0123456789").await.is_ok());
    let err = backend.get_booking("BK-20251103-001", "0199999999").await.unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));
}

#[tokio::test]
async fn test_unknown_coupon_is_a_field_error() {
    let url = serve(Router::new().route(
        "/coupons/validate",
        post(|| async { (StatusCode::NOT_FOUND, Json(json!({ "success": false }))) }),
    ))
    .await;
    let request = CouponValidationRequest {
        studio_slug: "najiahstudio".to_string(),
        code: "NOPE".to_string(),
    };

    let err = backend(&url).validate_coupon(&request).await.unwrap_err();

    assert_eq!(err.field(), Some("coupon_code"));
}

#[tokio::test]
async fn test_validate_coupon() {
    let url = serve(Router::new().route(
        "/coupons/validate",
        post(|| async {
            Json(ok(json!({
                "id": "coupon-1",
                "code": "RAYA10",
                "type": "percentage",
                "value": 10,
                "status": "active"
            })))
        }),
    ))
    .await;
    let request = CouponValidationRequest {
        studio_slug: "najiahstudio".to_string(),
        code: "RAYA10".to_string(),
    };

    let coupon = backend(&url).validate_coupon(&request).await.unwrap();

    assert_eq!(coupon.kind, CouponKind::Percentage);
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_validation_error() {
    let url = serve(Router::new().route(
        "/studio/najiahstudio/themes",
        get(|| async {
            Json(json!({ "success": false, "message": "Studio closed", "field": "studio" }))
        }),
    ))
    .await;

    let err = backend(&url).get_themes("najiahstudio").await.unwrap_err();

    assert_eq!(err.field(), Some("studio"));
}

#[tokio::test]
async fn test_release_hold_needs_no_data() {
    let url = serve(Router::new().route(
        "/holds/:id",
        delete(|Path(id): Path<String>, Query(query): Query<HashMap<String, String>>| async move {
            let own_studio = query.get("studio_slug").map(String::as_str) == Some("najiahstudio");
            if id == "hold-1" && own_studio {
                (StatusCode::OK, Json(json!({ "success": true })))
            } else {
                (StatusCode::NOT_FOUND, Json(json!({ "message": "Hold not found" })))
            }
        }),
    ))
    .await;
    let backend = backend(&url);

    assert!(backend.release_hold("najiahstudio", "hold-1").await.is_ok());
    assert!(matches!(
        backend.release_hold("najiahstudio", "hold-2").await.unwrap_err(),
        BookingError::NotFound(_)
    ));
    assert!(matches!(
        backend.release_hold("lensa", "hold-1").await.unwrap_err(),
        BookingError::NotFound(_)
    ));
}

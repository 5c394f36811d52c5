#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use serde_json::{json, Value};
use studiobook_client::{ClientConfig, HttpBackend};
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn backend(base_url: &str) -> HttpBackend {
    let config = ClientConfig {
        timeout: Duration::from_secs(2),
        retry_delay: Duration::from_millis(10),
        ..ClientConfig::new(base_url)
    };
    HttpBackend::new(config).unwrap()
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn studio_json() -> Value {
    json!({
        "id": "studio-001",
        "slug": "najiahstudio",
        "name": "Najiah Photography",
        "timezone": "Asia/Kuala_Lumpur",
        "currency": "MYR",
        "status": "active",
        "settings": { "deposit_percentage": 30 },
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    })
}

pub fn booking_json() -> Value {
    json!({
        "id": "booking-1",
        "studio_id": "studio-001",
        "booking_number": "BK-20251103-001",
        "theme_id": "theme-001",
        "booking_date": "2025-11-03",
        "start_time": "09:00",
        "end_time": "09:30",
        "pax_count": 5,
        "customer_name": "Aina",
        "customer_phone": "0123456789",
        "customer_email": "aina@example.com",
        "consent_tc": true,
        "consent_marketing": false,
        "base_price": 180,
        "extra_pax_fee": 0,
        "addons_total": 0,
        "total_amount": 180,
        "deposit_amount": 90,
        "balance_amount": 90,
        "payment_status": "pending",
        "booking_status": "confirmed",
        "created_at": "2025-11-01T08:00:00Z",
        "updated_at": "2025-11-01T08:00:00Z"
    })
}

mod common;

use axum::http::{header, HeaderValue, StatusCode};
use chrono::Duration;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use studiobook_client::mock::MockStudioBackend;
use studiobook_core::{
    errors::BookingError,
    models::studio::DEFAULT_BRAND_COLOR,
    tenant::SlugSource,
};
use studiobook_storefront::{handlers::studio::StudioResponse, middleware::tenant::BOOKING_STATE_HEADER};

/// A backend that only knows `slug`.
fn backend_for(slug: &'static str) -> MockStudioBackend {
    let mut backend = MockStudioBackend::new();
    backend.expect_get_studio().returning(move |requested| {
        if requested == slug {
            Ok(studio())
        } else {
            Err(BookingError::TenantNotFound(requested.to_string()))
        }
    });
    backend.expect_get_themes().returning(|_| Ok(vec![theme()]));
    backend.expect_get_addons().returning(|_| Ok(addons()));
    backend
        .expect_get_working_hours()
        .returning(|_| Ok(working_hours()));
    backend.expect_get_break_times().returning(|_| Ok(Vec::new()));
    backend
        .expect_get_blackout_dates()
        .returning(|_| Ok(Vec::new()));
    backend
        .expect_get_pricing_rules()
        .returning(|_| Ok(Vec::new()));
    backend
}

#[test_log::test(tokio::test)]
async fn test_subdomain_selects_studio() {
    let server = server(backend_for(STUDIO));

    let response = server
        .get("/api/studio")
        .add_header(HOST, HeaderValue::from_static("najiahstudio.sesifoto.my"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: StudioResponse = response.json();
    assert_eq!(body.studio.slug, STUDIO);
    assert_eq!(body.source, SlugSource::Subdomain);
    assert_eq!(body.brand_color, DEFAULT_BRAND_COLOR);
    assert_eq!(body.themes.len(), 1);
    assert_eq!(body.addons.len(), 1, "inactive add-ons are hidden");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[test_log::test(tokio::test)]
async fn test_localhost_falls_back_to_dev_studio_and_remembers_it() {
    let server = server(backend_for(STUDIO));

    let response = server.get("/api/studio").add_header(HOST, localhost()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: StudioResponse = response.json();
    assert_eq!(body.source, SlugSource::DevDefault);
    assert_eq!(
        response.headers().get(header::SET_COOKIE).unwrap(),
        "studio_slug=najiahstudio; Path=/; SameSite=Lax"
    );
}

#[test_log::test(tokio::test)]
async fn test_query_parameter_overrides_cookie() {
    let server = server(backend_for("lensa"));

    let response = server
        .get("/api/studio")
        .add_query_param("studio", "lensa")
        .add_header(HOST, localhost())
        .add_header(header::COOKIE, HeaderValue::from_static("theme=dark; studio_slug=najiahstudio"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: StudioResponse = response.json();
    assert_eq!(body.source, SlugSource::QueryParam);
    assert_eq!(
        response.headers().get(header::SET_COOKIE).unwrap(),
        "studio_slug=lensa; Path=/; SameSite=Lax"
    );
}

#[test_log::test(tokio::test)]
async fn test_session_cookie_selects_studio() {
    let server = server(backend_for("lensa"));

    let response = server
        .get("/api/studio")
        .add_header(HOST, localhost())
        .add_header(header::COOKIE, HeaderValue::from_static("studio_slug=lensa"))
        .await;

    let body: StudioResponse = response.json();
    assert_eq!(body.source, SlugSource::Session);
}

#[test_log::test(tokio::test)]
async fn test_saved_booking_state_selects_studio() {
    let server = server(backend_for("lensa"));
    let saved = json!({
        "studio_slug": "lensa",
        "selected_theme": "theme-001",
        "current_step": 2,
        "saved_at": now() - Duration::minutes(5),
    });

    let response = server
        .get("/api/studio")
        .add_header(HOST, localhost())
        .add_header(
            BOOKING_STATE_HEADER.parse().unwrap(),
            HeaderValue::from_str(&saved.to_string()).unwrap(),
        )
        .await;

    let body: StudioResponse = response.json();
    assert_eq!(body.source, SlugSource::SavedState);
}

#[test_log::test(tokio::test)]
async fn test_stale_saved_state_is_ignored() {
    let server = server(backend_for(STUDIO));
    let saved = json!({
        "studio_slug": "lensa",
        "selected_theme": "theme-001",
        "saved_at": now() - Duration::hours(2),
    });

    let response = server
        .get("/api/studio")
        .add_header(HOST, localhost())
        .add_header(
            BOOKING_STATE_HEADER.parse().unwrap(),
            HeaderValue::from_str(&saved.to_string()).unwrap(),
        )
        .await;

    let body: StudioResponse = response.json();
    assert_eq!(body.source, SlugSource::DevDefault);
    assert_eq!(body.studio.slug, STUDIO);
}

#[test_log::test(tokio::test)]
async fn test_reserved_subdomain_is_studio_not_found() {
    let mut backend = MockStudioBackend::new();
    backend.expect_get_studio().never();
    let server = server(backend);

    let response = server
        .get("/api/studio")
        .add_header(HOST, HeaderValue::from_static("www.sesifoto.my"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["view"], "studio-not-found");
    assert_eq!(body["studio"], "www.sesifoto.my");
}

#[test_log::test(tokio::test)]
async fn test_unknown_studio_is_studio_not_found() {
    let server = server(backend_for(STUDIO));

    let response = server
        .get("/api/studio")
        .add_header(HOST, HeaderValue::from_static("ghost.sesifoto.my"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["view"], "studio-not-found");
    assert_eq!(body["studio"], "ghost");
}

#[test_log::test(tokio::test)]
async fn test_suspended_studio_is_studio_not_found() {
    let mut backend = MockStudioBackend::new();
    backend.expect_get_studio().returning(|_| {
        let mut studio = studio();
        studio.status = studiobook_core::models::studio::StudioStatus::Suspended;
        Ok(studio)
    });
    let server = server(backend);

    let response = server
        .get("/api/studio")
        .add_header(HOST, HeaderValue::from_static("najiahstudio.sesifoto.my"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["view"], "studio-not-found");
}

#[tokio::test]
async fn test_health_and_version() {
    let server = server(MockStudioBackend::new());

    let health: Value = server.get("/health").await.json();
    assert_eq!(health, json!({ "status": "ok" }));

    let version: Value = server.get("/version").await.json();
    assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));
}

//! # Tenant extraction
//!
//! Every `/api` request belongs to one studio. [`Tenant`] runs the resolver
//! over the request's `Host` header, the `?studio=` parameter, the
//! `studio_slug` session cookie and the `X-Booking-State` header the widget
//! sends with its locally saved progress.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use studiobook_core::{
    errors::BookingError,
    tenant::{hostname, resolve_studio_slug, ResolvedTenant, SavedBookingState, TenantHints},
};

use crate::{middleware::error_handling::AppError, StorefrontState};

pub const STUDIO_COOKIE: &str = "studio_slug";
pub const BOOKING_STATE_HEADER: &str = "x-booking-state";

#[derive(Debug, Default, Deserialize)]
struct StudioQuery {
    studio: Option<String>,
}

/// The studio a request is for.
#[derive(Debug, Clone)]
pub struct Tenant(pub ResolvedTenant);

impl Tenant {
    pub fn slug(&self) -> &str {
        &self.0.slug
    }

    /// `Set-Cookie` value remembering a development override for the session.
    ///
    /// `None` for subdomain resolutions and for slugs that are not plain
    /// `[a-z0-9-]` labels.
    pub fn session_cookie(&self) -> Option<HeaderValue> {
        let slug = self.slug();
        let plain = slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !self.0.should_persist() || !plain {
            return None;
        }
        HeaderValue::from_str(&format!("{STUDIO_COOKIE}={slug}; Path=/; SameSite=Lax")).ok()
    }
}

fn cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[async_trait]
impl FromRequestParts<Arc<StorefrontState>> for Tenant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<StorefrontState>,
    ) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| parts.uri.host())
            .unwrap_or_default();

        let query = Query::<StudioQuery>::try_from_uri(&parts.uri)
            .map(|Query(query)| query)
            .unwrap_or_default();

        let saved_state: Option<SavedBookingState> = parts
            .headers
            .get(BOOKING_STATE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| serde_json::from_str(raw).ok());

        let hints = TenantHints {
            host,
            query_slug: query.studio.as_deref(),
            session_slug: cookie(&parts.headers, STUDIO_COOKIE),
            saved_state: saved_state.as_ref(),
            now: state.now(),
        };

        let resolved = resolve_studio_slug(&hints, &state.config.dev_studio)
            .ok_or_else(|| BookingError::TenantNotFound(hostname(host)))?;

        tracing::debug!(studio = %resolved.slug, source = ?resolved.source, "Resolved studio");
        Ok(Tenant(resolved))
    }
}

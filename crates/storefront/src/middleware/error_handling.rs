//! # Error Handling Middleware
//!
//! Maps [`BookingError`] onto HTTP status codes and a JSON body the widget
//! can render. Validation failures carry the offending `field` so the
//! message can be shown inline; an unknown studio carries
//! `"view": "studio-not-found"` so the widget switches to that page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use studiobook_core::errors::BookingError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use studiobook_core::errors::BookingError;
/// use studiobook_storefront::middleware::error_handling::AppError;
///
/// async fn handler(pax_count: u32) -> Result<Json<u32>, AppError> {
///     if pax_count == 0 {
///         return Err(BookingError::validation("pax_count", "At least one person").into());
///     }
///     Ok(Json(pax_count))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::TenantNotFound(_) => StatusCode::NOT_FOUND,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation { .. } => StatusCode::BAD_REQUEST,
            BookingError::SlotUnavailable(_) => StatusCode::CONFLICT,
            BookingError::HoldExpired(_) => StatusCode::GONE,
            BookingError::Backend(_) => StatusCode::BAD_GATEWAY,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self.0 {
            BookingError::TenantNotFound(slug) => json!({
                "error": self.0.to_string(),
                "view": "studio-not-found",
                "studio": slug,
            }),
            BookingError::Validation { field, message } => json!({
                "error": message,
                "field": field,
            }),
            BookingError::HoldExpired(expires_at) => json!({
                "error": self.0.to_string(),
                "expires_at": expires_at,
            }),
            BookingError::Backend(report) => {
                tracing::error!(error = ?report, "Backend failure");
                json!({ "error": "The booking service is temporarily unavailable" })
            }
            BookingError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                json!({ "error": "Internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Renders an error directly, for callers outside a handler's `Result`.
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}

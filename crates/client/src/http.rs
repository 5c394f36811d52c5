//! # HTTP backend
//!
//! Every backend response is wrapped in a `{ success, data, message }`
//! envelope. Non-2xx statuses are mapped onto [`BookingError`] variants so
//! the storefront can answer with the right status of its own.
//!
//! ## Retries
//!
//! A request is retried at most once, after `retry_delay`:
//!
//! - `GET`/`DELETE` on a transport failure or a 5xx response
//! - `POST` only when the connection was never established, since the
//!   backend cannot have acted on it

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{eyre, WrapErr};
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use studiobook_core::{
    errors::{BookingError, BookingResult},
    hold::CartHold,
    models::{
        booking::{Booking, BookingRequest, HoldRequest},
        coupon::{Coupon, CouponValidationRequest},
        pricing_rule::PricingRule,
        schedule::{BlackoutDate, BreakTime, WorkingHours},
        studio::Studio,
        theme::{Addon, Theme},
        time_slot::TimeSlot,
    },
};
use tracing::{error, warn};

use crate::{config::ClientConfig, StudioBackend};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    field: Option<String>,
}

/// Error bodies may or may not follow the envelope; only these keys matter.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    field: Option<String>,
}

#[derive(Serialize)]
struct CreateBookingBody<'a> {
    studio_slug: &'a str,
    #[serde(flatten)]
    booking: &'a BookingRequest,
}

/// How a 404 from a given endpoint should be reported.
#[derive(Debug, Clone, Copy)]
enum Missing<'a> {
    Studio(&'a str),
    Resource(&'a str),
}

struct Call<'a> {
    method: Method,
    path: String,
    query: Vec<(&'a str, String)>,
    body: Option<serde_json::Value>,
    missing: Missing<'a>,
}

impl<'a> Call<'a> {
    fn new(method: Method, path: String, missing: Missing<'a>) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
            missing,
        }
    }

    fn get(path: String, missing: Missing<'a>) -> Self {
        Self::new(Method::GET, path, missing)
    }

    fn post(path: &str, body: serde_json::Value, missing: Missing<'a>) -> Self {
        Self {
            body: Some(body),
            ..Self::new(Method::POST, path.to_string(), missing)
        }
    }

    fn query(mut self, key: &'a str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    fn idempotent(&self) -> bool {
        self.method != Method::POST
    }
}

enum Outcome {
    Response(StatusCode, String),
    Transport(reqwest::Error),
}

impl Outcome {
    fn worth_retrying(&self, idempotent: bool) -> bool {
        match self {
            Self::Response(status, _) => idempotent && status.is_server_error(),
            Self::Transport(err) => idempotent || err.is_connect(),
        }
    }
}

/// [`StudioBackend`] over the backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> eyre::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .wrap_err("Failed to build backend HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn studio_path(slug: &str, rest: &str) -> String {
        format!("/studio/{}{}", urlencoding::encode(slug), rest)
    }

    async fn attempt(&self, call: &Call<'_>) -> Outcome {
        let url = format!("{}{}", self.config.base_url, call.path);
        let mut request = self.client.request(call.method.clone(), url);
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return Outcome::Transport(err),
        };
        let status = response.status();
        match response.text().await {
            Ok(text) => Outcome::Response(status, text),
            Err(err) => Outcome::Transport(err),
        }
    }

    async fn execute(&self, call: Call<'_>) -> BookingResult<String> {
        let mut outcome = self.attempt(&call).await;

        if outcome.worth_retrying(call.idempotent()) {
            warn!(method = %call.method, path = %call.path, "Backend request failed, retrying once");
            tokio::time::sleep(self.config.retry_delay).await;
            outcome = self.attempt(&call).await;
        }

        match outcome {
            Outcome::Response(status, body) if status.is_success() => Ok(body),
            Outcome::Response(status, body) => Err(map_status(status, &body, call.missing)),
            Outcome::Transport(err) => {
                error!(method = %call.method, path = %call.path, error = %err, "Backend unreachable");
                Err(BookingError::Backend(
                    eyre!(err).wrap_err(format!("{} {} failed", call.method, call.path)),
                ))
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, call: Call<'_>) -> BookingResult<T> {
        let path = call.path.clone();
        let body = self.execute(call).await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)
            .wrap_err_with(|| format!("Malformed backend response from {path}"))?;

        if !envelope.success {
            return Err(BookingError::validation(
                envelope.field.unwrap_or_else(|| "request".to_string()),
                envelope
                    .message
                    .unwrap_or_else(|| "Request rejected by backend".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| BookingError::Backend(eyre!("Backend response from {path} has no data")))
    }
}

fn map_status(status: StatusCode, body: &str, missing: Missing<'_>) -> BookingError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    match status {
        StatusCode::NOT_FOUND => match missing {
            Missing::Studio(slug) => BookingError::TenantNotFound(slug.to_string()),
            Missing::Resource(what) => BookingError::NotFound(format!("{what}: {message}")),
        },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            BookingError::validation(parsed.field.unwrap_or_else(|| "request".to_string()), message)
        }
        StatusCode::CONFLICT => BookingError::SlotUnavailable(message),
        _ => {
            error!(%status, %message, "Backend request failed");
            BookingError::Backend(eyre!("Backend returned {status}: {message}"))
        }
    }
}

#[async_trait]
impl StudioBackend for HttpBackend {
    async fn get_studio(&self, slug: &str) -> BookingResult<Studio> {
        self.fetch(Call::get(Self::studio_path(slug, ""), Missing::Studio(slug)))
            .await
    }

    async fn get_themes(&self, slug: &str) -> BookingResult<Vec<Theme>> {
        self.fetch(Call::get(Self::studio_path(slug, "/themes"), Missing::Studio(slug)))
            .await
    }

    async fn get_addons(&self, slug: &str) -> BookingResult<Vec<Addon>> {
        self.fetch(Call::get(Self::studio_path(slug, "/addons"), Missing::Studio(slug)))
            .await
    }

    async fn get_working_hours(&self, slug: &str) -> BookingResult<Vec<WorkingHours>> {
        self.fetch(Call::get(
            Self::studio_path(slug, "/working-hours"),
            Missing::Studio(slug),
        ))
        .await
    }

    async fn get_break_times(&self, slug: &str) -> BookingResult<Vec<BreakTime>> {
        self.fetch(Call::get(
            Self::studio_path(slug, "/break-times"),
            Missing::Studio(slug),
        ))
        .await
    }

    async fn get_blackout_dates(&self, slug: &str) -> BookingResult<Vec<BlackoutDate>> {
        self.fetch(Call::get(
            Self::studio_path(slug, "/blackout-dates"),
            Missing::Studio(slug),
        ))
        .await
    }

    async fn get_pricing_rules(&self, slug: &str) -> BookingResult<Vec<PricingRule>> {
        self.fetch(Call::get(
            Self::studio_path(slug, "/pricing-rules"),
            Missing::Studio(slug),
        ))
        .await
    }

    async fn get_slots(
        &self,
        slug: &str,
        theme_id: &str,
        date: NaiveDate,
    ) -> BookingResult<Vec<TimeSlot>> {
        let path = Self::studio_path(
            slug,
            &format!("/themes/{}/slots", urlencoding::encode(theme_id)),
        );
        self.fetch(Call::get(path, Missing::Resource("Theme")).query("date", date))
            .await
    }

    async fn validate_coupon(&self, request: &CouponValidationRequest) -> BookingResult<Coupon> {
        let body = serde_json::to_value(request).wrap_err("Failed to encode coupon request")?;
        self.fetch(Call::post("/coupons/validate", body, Missing::Resource("Coupon")))
            .await
            .map_err(|err| match err {
                // The backend answers an unknown code with 404; the widget shows it inline.
                BookingError::NotFound(_) => {
                    BookingError::validation("coupon_code", "Invalid coupon code")
                }
                other => other,
            })
    }

    async fn create_booking(&self, slug: &str, request: &BookingRequest) -> BookingResult<Booking> {
        let body = serde_json::to_value(CreateBookingBody {
            studio_slug: slug,
            booking: request,
        })
        .wrap_err("Failed to encode booking request")?;

        self.fetch(Call::post("/bookings", body, Missing::Resource("Theme")))
            .await
    }

    async fn get_booking(&self, booking_number: &str, phone: &str) -> BookingResult<Booking> {
        let path = format!("/bookings/{}", urlencoding::encode(booking_number));
        self.fetch(Call::get(path, Missing::Resource("Booking")).query("phone", phone))
            .await
    }

    async fn create_hold(&self, request: &HoldRequest) -> BookingResult<CartHold> {
        let body = serde_json::to_value(request).wrap_err("Failed to encode hold request")?;
        self.fetch(Call::post("/holds", body, Missing::Resource("Slot")))
            .await
    }

    async fn release_hold(&self, slug: &str, hold_id: &str) -> BookingResult<()> {
        let path = format!("/holds/{}", urlencoding::encode(hold_id));
        let call = Call::new(Method::DELETE, path, Missing::Resource("Hold")).query("studio_slug", slug);
        self.execute(call)
            .await
            .map(|_| ())
    }
}

//! # studiobook client
//!
//! Typed access to the studio backend API. The backend owns every studio's
//! configuration and is authoritative for slots, coupons, holds and booking
//! totals; this crate only fetches and forwards.
//!
//! [`StudioBackend`] is the seam the storefront depends on. [`HttpBackend`]
//! implements it over HTTP and [`mock::MockStudioBackend`] stands in for it
//! in tests.

pub mod catalog;
pub mod config;
pub mod http;
pub mod mock;

use async_trait::async_trait;
use chrono::NaiveDate;
use studiobook_core::{
    errors::BookingResult,
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

pub use catalog::load_catalog;
pub use config::ClientConfig;
pub use http::HttpBackend;

/// Every backend call the storefront makes, keyed by studio slug.
#[async_trait]
pub trait StudioBackend: Send + Sync {
    async fn get_studio(&self, slug: &str) -> BookingResult<Studio>;

    async fn get_themes(&self, slug: &str) -> BookingResult<Vec<Theme>>;

    async fn get_addons(&self, slug: &str) -> BookingResult<Vec<Addon>>;

    async fn get_working_hours(&self, slug: &str) -> BookingResult<Vec<WorkingHours>>;

    async fn get_break_times(&self, slug: &str) -> BookingResult<Vec<BreakTime>>;

    async fn get_blackout_dates(&self, slug: &str) -> BookingResult<Vec<BlackoutDate>>;

    async fn get_pricing_rules(&self, slug: &str) -> BookingResult<Vec<PricingRule>>;

    /// Server-computed slots; these win over anything computed locally.
    async fn get_slots(
        &self,
        slug: &str,
        theme_id: &str,
        date: NaiveDate,
    ) -> BookingResult<Vec<TimeSlot>>;

    async fn validate_coupon(&self, request: &CouponValidationRequest) -> BookingResult<Coupon>;

    async fn create_booking(&self, slug: &str, request: &BookingRequest) -> BookingResult<Booking>;

    async fn get_booking(&self, booking_number: &str, phone: &str) -> BookingResult<Booking>;

    async fn create_hold(&self, request: &HoldRequest) -> BookingResult<CartHold>;

    async fn release_hold(&self, slug: &str, hold_id: &str) -> BookingResult<()>;
}

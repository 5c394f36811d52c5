use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
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

use crate::StudioBackend;

// Mock backend for storefront tests
mock! {
    pub StudioBackend {}

    #[async_trait]
    impl StudioBackend for StudioBackend {
        async fn get_studio(&self, slug: &str) -> BookingResult<Studio>;
        async fn get_themes(&self, slug: &str) -> BookingResult<Vec<Theme>>;
        async fn get_addons(&self, slug: &str) -> BookingResult<Vec<Addon>>;
        async fn get_working_hours(&self, slug: &str) -> BookingResult<Vec<WorkingHours>>;
        async fn get_break_times(&self, slug: &str) -> BookingResult<Vec<BreakTime>>;
        async fn get_blackout_dates(&self, slug: &str) -> BookingResult<Vec<BlackoutDate>>;
        async fn get_pricing_rules(&self, slug: &str) -> BookingResult<Vec<PricingRule>>;
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
}

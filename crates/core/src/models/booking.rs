use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{schedule::TimeOfDay, theme::Addon};
use crate::totals::BookingTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    DepositPaid,
    PaidFull,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    CartHold,
    Confirmed,
    Undelivered,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedAddon {
    pub addon_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingAddon {
    pub addon: Addon,
    pub quantity: u32,
    pub price_at_booking: i64,
}

/// What the widget submits once the customer confirms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub theme_id: String,
    pub booking_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub pax_count: u32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_notes: Option<String>,
    pub consent_tc: bool,
    #[serde(default)]
    pub consent_marketing: bool,
    #[serde(default)]
    pub selected_addons: Vec<SelectedAddon>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub hold_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub studio_id: String,
    pub booking_number: String,
    pub theme_id: String,
    pub booking_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub pax_count: u32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_notes: String,
    pub consent_tc: bool,
    pub consent_marketing: bool,
    #[serde(default)]
    pub addons: Vec<BookingAddon>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    pub base_price: i64,
    pub extra_pax_fee: i64,
    pub addons_total: i64,
    #[serde(default)]
    pub discount_amount: i64,
    pub total_amount: i64,
    pub deposit_amount: i64,
    pub balance_amount: i64,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    #[serde(default)]
    pub cart_hold_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whether the backend's breakdown equals a locally computed one.
    pub fn matches_totals(&self, totals: &BookingTotals) -> bool {
        self.base_price == totals.base_price
            && self.extra_pax_fee == totals.extra_pax_fee
            && self.addons_total == totals.addons_total
            && self.discount_amount == totals.discount_amount
            && self.total_amount == totals.total_amount
            && self.deposit_amount == totals.deposit_amount
            && self.balance_amount == totals.balance_amount
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldRequest {
    pub studio_slug: String,
    pub theme_id: String,
    pub booking_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

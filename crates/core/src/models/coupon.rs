use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::theme::CatalogStatus;
use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponKind {
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: CouponKind,
    pub value: i64,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default)]
    pub min_spend: Option<i64>,
    pub status: CatalogStatus,
}

impl Coupon {
    /// Local pre-check mirroring the backend's coupon validation.
    ///
    /// Minimum spend depends on the basket and is checked by the totals
    /// calculator instead.
    pub fn check_applicable(&self, today: NaiveDate) -> BookingResult<()> {
        let reject = |message: &str| Err(BookingError::validation("coupon_code", message));

        if self.status != CatalogStatus::Active {
            return reject("Invalid coupon code");
        }
        if self.valid_from.is_some_and(|from| today < from) {
            return reject("Coupon not yet valid");
        }
        if self.valid_until.is_some_and(|until| today > until) {
            return reject("Coupon expired");
        }
        if self
            .usage_limit
            .is_some_and(|limit| self.usage_count >= limit)
        {
            return reject("Coupon usage limit reached");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponValidationRequest {
    pub studio_slug: String,
    pub code: String,
}

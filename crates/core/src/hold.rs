//! Cart holds: a short, advisory reservation of a slot while the customer
//! fills in details and pays. Expiry is decided by comparing against the
//! caller's clock at read time; nothing mutates a hold when it lapses.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::schedule::TimeOfDay,
};

/// A hold is still valid at the instant it expires.
fn lapsed(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > expires_at
}

/// [`BookingError::HoldExpired`] once `now` is past `expires_at`. For callers
/// that only know a hold's expiry, not the hold itself.
pub fn ensure_unexpired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> BookingResult<()> {
    if lapsed(expires_at, now) {
        return Err(BookingError::HoldExpired(expires_at));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartHold {
    pub id: String,
    pub theme_id: String,
    pub booking_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CartHold {
    /// A client-local hold lasting `duration_minutes` from `now`.
    pub fn new(
        theme_id: impl Into<String>,
        booking_date: NaiveDate,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        now: DateTime<Utc>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            theme_id: theme_id.into(),
            booking_date,
            start_time,
            end_time,
            created_at: now,
            expires_at: now + Duration::minutes(i64::from(duration_minutes)),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        lapsed(self.expires_at, now)
    }

    /// Time left before the hold lapses, zero once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }

    /// Errors with [`BookingError::HoldExpired`] once the hold has lapsed;
    /// the caller has to re-request availability before continuing.
    pub fn ensure_active(&self, now: DateTime<Utc>) -> BookingResult<()> {
        ensure_unexpired(self.expires_at, now)
    }

    pub fn covers(&self, theme_id: &str, date: NaiveDate, start: TimeOfDay) -> bool {
        self.theme_id == theme_id && self.booking_date == date && self.start_time == start
    }
}

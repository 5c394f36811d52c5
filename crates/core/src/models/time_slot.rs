use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schedule::TimeOfDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Booked,
    Held,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub status: SlotStatus,
    pub price: i64,
    pub is_special_pricing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_pricing_label: Option<String>,
}

impl TimeSlot {
    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }
}

/// An interval already taken on the day being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStatus {
    Available,
    FullyBooked,
    Blackout,
    SpecialPricing,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSlotInfo {
    pub date: NaiveDate,
    pub status: DateStatus,
    pub slots_available: usize,
    pub slots_total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_pricing_label: Option<String>,
}

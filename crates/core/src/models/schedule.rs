use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute precision, `00:00` through `24:00`.
///
/// Serialized as `"HH:MM"`, which is how the backend ships working hours,
/// break times and slot boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid time of day {0:?}, expected HH:MM")]
pub struct ParseTimeOfDayError(String);

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self(0);
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        u16::try_from(minutes)
            .ok()
            .filter(|m| *m <= MINUTES_PER_DAY)
            .map(Self)
    }

    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        if minutes >= 60 {
            return None;
        }
        Self::from_minutes(hours * 60 + minutes)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// Returns `None` when the result would run past the end of the day.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        self.minutes()
            .checked_add(minutes)
            .and_then(Self::from_minutes)
    }

    /// `24:00` has no `NaiveTime` representation.
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeOfDayError(s.to_string());
        let mut parts = s.trim().split(':');
        let hours: u32 = parts.next().and_then(|h| h.parse().ok()).ok_or_else(err)?;
        let minutes: u32 = parts.next().and_then(|m| m.parse().ok()).ok_or_else(err)?;
        // Tolerate a trailing ":00" seconds component.
        match parts.next() {
            None | Some("00") => {}
            Some(_) => return Err(err()),
        }
        if parts.next().is_some() {
            return Err(err());
        }
        Self::from_hm(hours, minutes).ok_or_else(err)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Half-open interval intersection: `[a_start, a_end)` meets `[b_start, b_end)`.
pub fn overlaps(a_start: TimeOfDay, a_end: TimeOfDay, b_start: TimeOfDay, b_end: TimeOfDay) -> bool {
    a_start < b_end && a_end > b_start
}

/// Day of week as the backend numbers it: 0 = Sunday .. 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHours {
    pub id: String,
    pub day_of_week: u8,
    pub active: bool,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    #[serde(default)]
    pub applies_to_date_range: Option<DateRange>,
}

impl WorkingHours {
    pub fn is_open(&self) -> bool {
        self.active && self.start < self.end
    }

    fn applies_to(&self, date: NaiveDate) -> bool {
        self.day_of_week == day_of_week(date)
            && self
                .applies_to_date_range
                .is_none_or(|range| range.contains(date))
    }
}

/// Picks the working-hours entry governing `date`.
///
/// An entry scoped to a date range containing `date` beats an unscoped one;
/// among equals the first listed wins.
pub fn hours_for_date(hours: &[WorkingHours], date: NaiveDate) -> Option<&WorkingHours> {
    let mut applicable = hours.iter().filter(|wh| wh.applies_to(date));
    let first = applicable.next()?;
    if first.applies_to_date_range.is_some() {
        return Some(first);
    }
    applicable
        .find(|wh| wh.applies_to_date_range.is_some())
        .or(Some(first))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakTime {
    pub id: String,
    pub name: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub days_of_week: Vec<u8>,
}

impl BreakTime {
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.days_of_week.contains(&day_of_week(date))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackoutDate {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    /// `None` for a single-day blackout.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub reason: String,
}

impl BlackoutDate {
    pub fn covers(&self, date: NaiveDate) -> bool {
        match self.end_date {
            None => date == self.start_date,
            Some(end) => self.start_date <= date && date <= end,
        }
    }
}

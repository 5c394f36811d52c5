//! # Slot generation
//!
//! Turns a studio's recurring schedule into bookable slots for one theme on
//! one date. The backend's slot endpoint stays authoritative; this is the
//! local computation used for date summaries, quotes and the offline
//! fallback.
//!
//! Candidate slots start at the opening time and advance by the theme's
//! duration plus buffer. A candidate is dropped when it runs past closing or
//! intersects a break active on that weekday. Blackout dates produce no
//! slots at all.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        pricing_rule::PricingRule,
        schedule::{hours_for_date, overlaps, BlackoutDate, BreakTime, TimeOfDay, WorkingHours},
        studio::StudioSettings,
        theme::Theme,
        time_slot::{DateSlotInfo, DateStatus, Occupancy, SlotStatus, TimeSlot},
    },
    pricing::resolve_price,
};

/// Longest range a single date-summary request may cover.
pub const MAX_SUMMARY_DAYS: i64 = 62;

/// Borrowed view of the tenant configuration the generator reads.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityConfig<'a> {
    pub working_hours: &'a [WorkingHours],
    pub break_times: &'a [BreakTime],
    pub blackout_dates: &'a [BlackoutDate],
    pub pricing_rules: &'a [PricingRule],
    pub settings: &'a StudioSettings,
}

/// Per-request inputs on top of the configuration.
#[derive(Debug, Clone, Copy)]
pub struct SlotRequest<'a> {
    pub theme: &'a Theme,
    pub date: NaiveDate,
    pub occupancy: &'a [Occupancy],
    pub now: DateTime<Utc>,
    pub tz: Tz,
}

pub fn blackout_for(blackouts: &[BlackoutDate], date: NaiveDate) -> Option<&BlackoutDate> {
    blackouts.iter().find(|b| b.covers(date))
}

/// Candidate slots for `theme` on `date`, priced and all marked available.
///
/// Does not look at the booking window, cutoff or occupancy; see
/// [`available_slots`] for that.
pub fn generate_slots(
    config: &AvailabilityConfig<'_>,
    theme: &Theme,
    date: NaiveDate,
) -> BookingResult<Vec<TimeSlot>> {
    if theme.duration_minutes == 0 {
        return Err(BookingError::validation(
            "theme_id",
            format!("Theme {} has no session duration", theme.id),
        ));
    }

    if let Some(blackout) = blackout_for(config.blackout_dates, date) {
        tracing::debug!(%date, title = %blackout.title, "Date is blacked out");
        return Ok(Vec::new());
    }

    let Some(hours) = hours_for_date(config.working_hours, date).filter(|wh| wh.is_open()) else {
        return Ok(Vec::new());
    };

    let breaks: Vec<&BreakTime> = config
        .break_times
        .iter()
        .filter(|bt| bt.applies_on(date))
        .collect();

    let duration = theme.duration_minutes;
    let interval = duration + theme.buffer_or(config.settings.buffer_minutes);
    let price = resolve_price(config.pricing_rules, theme, date);

    let mut slots = Vec::new();
    let mut current = hours.start;
    while current < hours.end {
        let Some(end) = current.checked_add_minutes(duration) else {
            break;
        };
        if end > hours.end {
            break;
        }

        let hits_break = breaks
            .iter()
            .any(|bt| overlaps(current, end, bt.start_time, bt.end_time));
        if !hits_break {
            slots.push(TimeSlot {
                start: current,
                end,
                status: SlotStatus::Available,
                price: price.price,
                is_special_pricing: price.is_special_pricing,
                special_pricing_label: price.label.clone(),
            });
        }

        match current.checked_add_minutes(interval) {
            Some(next) => current = next,
            None => break,
        }
    }

    Ok(slots)
}

/// Slots a customer may pick right now.
///
/// Dates outside the booking window yield nothing, slots starting before
/// `now + auto_cutoff_hours` are dropped, and slots intersecting an
/// occupied interval take that interval's status.
pub fn available_slots(
    config: &AvailabilityConfig<'_>,
    request: &SlotRequest<'_>,
) -> BookingResult<Vec<TimeSlot>> {
    if !config.settings.accepts_date(request.date) {
        return Ok(Vec::new());
    }

    let cutoff = request.now + Duration::hours(i64::from(config.settings.auto_cutoff_hours));

    let mut slots = generate_slots(config, request.theme, request.date)?;
    slots.retain(|slot| {
        slot_start_utc(request.tz, request.date, slot.start).is_some_and(|start| start > cutoff)
    });

    for slot in &mut slots {
        slot.status = occupancy_status(request.occupancy, slot.start, slot.end);
    }

    Ok(slots)
}

fn occupancy_status(occupancy: &[Occupancy], start: TimeOfDay, end: TimeOfDay) -> SlotStatus {
    let mut status = SlotStatus::Available;
    for taken in occupancy.iter().filter(|o| overlaps(start, end, o.start, o.end)) {
        match taken.status {
            SlotStatus::Booked => return SlotStatus::Booked,
            SlotStatus::Held => status = SlotStatus::Held,
            SlotStatus::Available => {}
        }
    }
    status
}

/// Absolute start of a slot; `None` when the local time does not exist (DST gap).
pub fn slot_start_utc(tz: Tz, date: NaiveDate, start: TimeOfDay) -> Option<DateTime<Utc>> {
    let local = date.and_time(start.to_naive_time()?);
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Calendar summary for one date.
pub fn summarize_date(
    config: &AvailabilityConfig<'_>,
    theme: &Theme,
    date: NaiveDate,
    now: DateTime<Utc>,
    tz: Tz,
) -> BookingResult<DateSlotInfo> {
    let empty = |status| DateSlotInfo {
        date,
        status,
        slots_available: 0,
        slots_total: 0,
        special_pricing_label: None,
    };

    if blackout_for(config.blackout_dates, date).is_some() {
        return Ok(empty(DateStatus::Blackout));
    }

    let today = now.with_timezone(&tz).date_naive();
    let has_hours = hours_for_date(config.working_hours, date).is_some_and(|wh| wh.is_open());
    if date < today || !has_hours || !config.settings.accepts_date(date) {
        return Ok(empty(DateStatus::Closed));
    }

    let request = SlotRequest {
        theme,
        date,
        occupancy: &[],
        now,
        tz,
    };
    let slots = available_slots(config, &request)?;
    let slots_available = slots.iter().filter(|s| s.is_available()).count();
    let price = resolve_price(config.pricing_rules, theme, date);

    let status = if slots_available == 0 {
        DateStatus::FullyBooked
    } else if price.is_special_pricing {
        DateStatus::SpecialPricing
    } else {
        DateStatus::Available
    };

    Ok(DateSlotInfo {
        date,
        status,
        slots_available,
        slots_total: slots.len(),
        special_pricing_label: price.label,
    })
}

/// Summaries for every date in `from..=to`.
pub fn summarize_range(
    config: &AvailabilityConfig<'_>,
    theme: &Theme,
    from: NaiveDate,
    to: NaiveDate,
    now: DateTime<Utc>,
    tz: Tz,
) -> BookingResult<Vec<DateSlotInfo>> {
    if to < from {
        return Err(BookingError::validation("to", "End date is before start date"));
    }
    if (to - from).num_days() >= MAX_SUMMARY_DAYS {
        return Err(BookingError::validation(
            "to",
            format!("Date range may span at most {MAX_SUMMARY_DAYS} days"),
        ));
    }

    from.iter_days()
        .take_while(|date| *date <= to)
        .map(|date| summarize_date(config, theme, date, now, tz))
        .collect()
}

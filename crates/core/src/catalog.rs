use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    availability::{available_slots, AvailabilityConfig, SlotRequest},
    errors::{BookingError, BookingResult},
    models::{
        booking::SelectedAddon,
        coupon::Coupon,
        pricing_rule::PricingRule,
        schedule::{BlackoutDate, BreakTime, TimeOfDay, WorkingHours},
        studio::Studio,
        theme::{Addon, Theme},
        time_slot::{Occupancy, TimeSlot},
    },
    pricing::resolve_price,
    totals::{calculate_totals, resolve_addons, BookingTotals, TotalsInput},
};

/// Everything a studio has configured, as loaded from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub studio: Studio,
    pub themes: Vec<Theme>,
    pub addons: Vec<Addon>,
    pub working_hours: Vec<WorkingHours>,
    pub break_times: Vec<BreakTime>,
    pub blackout_dates: Vec<BlackoutDate>,
    pub pricing_rules: Vec<PricingRule>,
}

/// A customer's pick, before contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub theme_id: String,
    pub booking_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub pax_count: u32,
    #[serde(default)]
    pub selected_addons: Vec<SelectedAddon>,
}

impl Catalog {
    pub fn availability(&self) -> AvailabilityConfig<'_> {
        AvailabilityConfig {
            working_hours: &self.working_hours,
            break_times: &self.break_times,
            blackout_dates: &self.blackout_dates,
            pricing_rules: &self.pricing_rules,
            settings: &self.studio.settings,
        }
    }

    /// An active theme by id.
    pub fn theme(&self, theme_id: &str) -> BookingResult<&Theme> {
        self.themes
            .iter()
            .find(|t| t.id == theme_id && t.is_active())
            .ok_or_else(|| BookingError::NotFound(format!("Theme {theme_id} not found")))
    }

    pub fn active_themes(&self) -> Vec<&Theme> {
        let mut themes: Vec<&Theme> = self.themes.iter().filter(|t| t.is_active()).collect();
        themes.sort_by_key(|t| t.sort_order);
        themes
    }

    pub fn active_addons(&self) -> Vec<&Addon> {
        let mut addons: Vec<&Addon> = self.addons.iter().filter(|a| a.is_active()).collect();
        addons.sort_by_key(|a| a.sort_order);
        addons
    }

    pub fn slots(
        &self,
        theme_id: &str,
        date: NaiveDate,
        occupancy: &[Occupancy],
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<TimeSlot>> {
        let theme = self.theme(theme_id)?;
        let request = SlotRequest {
            theme,
            date,
            occupancy,
            now,
            tz: self.studio.tz(),
        };
        available_slots(&self.availability(), &request)
    }

    /// The slot starting at `start`, if it is currently offered and free.
    pub fn offered_slot(
        &self,
        theme_id: &str,
        date: NaiveDate,
        start: TimeOfDay,
        now: DateTime<Utc>,
    ) -> BookingResult<TimeSlot> {
        self.slots(theme_id, date, &[], now)?
            .into_iter()
            .find(|slot| slot.start == start && slot.is_available())
            .ok_or_else(|| {
                BookingError::SlotUnavailable(format!("{date} {start} is not bookable"))
            })
    }

    /// Local price breakdown for a selection; the backend's figures win on submit.
    pub fn quote(&self, selection: &Selection, coupon: Option<&Coupon>) -> BookingResult<BookingTotals> {
        let theme = self.theme(&selection.theme_id)?;
        let price = resolve_price(&self.pricing_rules, theme, selection.booking_date);
        let addons = resolve_addons(&self.addons, &selection.selected_addons)?;

        calculate_totals(&TotalsInput {
            theme,
            base_price: price.price,
            pax_count: selection.pax_count,
            addons: &addons,
            coupon,
            settings: &self.studio.settings,
        })
    }
}

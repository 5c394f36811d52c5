//! # Booking session
//!
//! The widget's state lives in one [`BookingSession`] value that only
//! changes through [`BookingSession::apply`]. Derived figures (totals, cart
//! summary) are recomputed inside `apply`, never by background work.
//!
//! Slot lists arrive asynchronously. Every fetch is issued a [`Ticket`]; a
//! [`SessionEvent::SlotsLoaded`] whose ticket is not the latest one, or whose
//! date no longer matches the selected date, is dropped instead of being
//! applied to a view the customer has already left.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, Selection},
    errors::{BookingError, BookingResult},
    hold::CartHold,
    models::{
        booking::{Booking, SelectedAddon},
        coupon::Coupon,
        schedule::TimeOfDay,
        studio::Language,
        time_slot::TimeSlot,
    },
    totals::{calculate_totals, cart_summary, resolve_addons, BookingTotals, CartSummary, TotalsInput},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub enum SessionEvent {
    LanguageToggled,
    LanguageSet(Language),
    ThemeSelected(String),
    DateSelected(NaiveDate),
    SlotsLoaded {
        ticket: Ticket,
        date: NaiveDate,
        slots: Vec<TimeSlot>,
    },
    SlotSelected(TimeOfDay),
    PaxChanged(u32),
    /// Quantity 0 removes the add-on.
    AddonQuantitySet { addon_id: String, quantity: u32 },
    AddonToggled(String),
    CouponApplied(Coupon),
    CouponCleared,
    HoldPlaced(CartHold),
    HoldReleased,
    AddedToCart,
    CartItemRemoved(usize),
    BookingCompleted(Booking),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    Discarded,
}

/// A message rendered next to `field`, or at the top of the form without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub field: Option<String>,
    pub message: String,
}

impl From<&BookingError> for Notice {
    fn from(err: &BookingError) -> Self {
        let message = match err {
            BookingError::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self {
            field: err.field().map(str::to_string),
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub selection: Selection,
    pub end_time: TimeOfDay,
    pub totals: BookingTotals,
}

#[derive(Debug, Clone)]
pub struct BookingSession {
    catalog: Arc<Catalog>,
    language: Language,
    theme_id: Option<String>,
    date: Option<NaiveDate>,
    slots: Vec<TimeSlot>,
    issued: u64,
    selected_slot: Option<TimeSlot>,
    pax_count: u32,
    addons: Vec<SelectedAddon>,
    coupon: Option<Coupon>,
    hold: Option<CartHold>,
    cart: Vec<CartItem>,
    totals: Option<BookingTotals>,
    notice: Option<Notice>,
    completed: Option<Booking>,
}

impl BookingSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let language = catalog.studio.default_language;
        Self {
            catalog,
            language,
            theme_id: None,
            date: None,
            slots: Vec::new(),
            issued: 0,
            selected_slot: None,
            pax_count: 0,
            addons: Vec::new(),
            coupon: None,
            hold: None,
            cart: Vec::new(),
            totals: None,
            notice: None,
            completed: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn theme_id(&self) -> Option<&str> {
        self.theme_id.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn selected_slot(&self) -> Option<&TimeSlot> {
        self.selected_slot.as_ref()
    }

    pub fn pax_count(&self) -> u32 {
        self.pax_count
    }

    pub fn addons(&self) -> &[SelectedAddon] {
        &self.addons
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    pub fn hold(&self) -> Option<&CartHold> {
        self.hold.as_ref()
    }

    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    pub fn totals(&self) -> Option<&BookingTotals> {
        self.totals.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn completed(&self) -> Option<&Booking> {
        self.completed.as_ref()
    }

    pub fn cart_summary(&self) -> CartSummary {
        let items: Vec<BookingTotals> = self.cart.iter().map(|item| item.totals).collect();
        cart_summary(&items, &self.catalog.studio.settings)
    }

    /// Starts a slot fetch for the current theme and date.
    ///
    /// Any fetch issued earlier becomes stale.
    pub fn request_slots(&mut self) -> Option<(Ticket, String, NaiveDate)> {
        let theme_id = self.theme_id.clone()?;
        let date = self.date?;
        self.issued += 1;
        Some((Ticket(self.issued), theme_id, date))
    }

    pub fn selection(&self) -> Option<Selection> {
        Some(Selection {
            theme_id: self.theme_id.clone()?,
            booking_date: self.date?,
            start_time: self.selected_slot.as_ref()?.start,
            pax_count: self.pax_count,
            selected_addons: self.addons.clone(),
        })
    }

    /// Fails once the hold has lapsed; no hold at all is not an error.
    pub fn ensure_hold_active(&self, now: DateTime<Utc>) -> BookingResult<()> {
        match &self.hold {
            Some(hold) => hold.ensure_active(now),
            None => Ok(()),
        }
    }

    pub fn apply(&mut self, event: SessionEvent) -> Applied {
        self.notice = None;

        match event {
            SessionEvent::LanguageToggled => self.language = self.language.toggled(),
            SessionEvent::LanguageSet(language) => self.language = language,
            SessionEvent::ThemeSelected(theme_id) => match self.catalog.theme(&theme_id) {
                Ok(theme) => {
                    self.pax_count = theme.base_pax;
                    self.theme_id = Some(theme_id);
                    self.clear_day();
                    self.addons.clear();
                }
                Err(err) => self.notice = Some(Notice::from(&err)),
            },
            SessionEvent::DateSelected(date) => {
                self.date = Some(date);
                self.clear_day();
            }
            SessionEvent::SlotsLoaded { ticket, date, slots } => {
                if ticket != Ticket(self.issued) || self.date != Some(date) {
                    tracing::debug!(?ticket, %date, "Discarding stale slot response");
                    return Applied::Discarded;
                }
                self.slots = slots;
            }
            SessionEvent::SlotSelected(start) => {
                match self.slots.iter().find(|s| s.start == start && s.is_available()) {
                    Some(slot) => {
                        self.selected_slot = Some(slot.clone());
                        self.hold = None;
                    }
                    None => {
                        let err = BookingError::SlotUnavailable(format!("{start} is no longer available"));
                        self.notice = Some(Notice::from(&err));
                    }
                }
            }
            SessionEvent::PaxChanged(pax_count) => self.pax_count = pax_count,
            SessionEvent::AddonQuantitySet { addon_id, quantity } => {
                self.addons.retain(|a| a.addon_id != addon_id);
                if quantity > 0 {
                    self.addons.push(SelectedAddon { addon_id, quantity });
                }
            }
            SessionEvent::AddonToggled(addon_id) => {
                if let Some(index) = self.addons.iter().position(|a| a.addon_id == addon_id) {
                    self.addons.remove(index);
                } else {
                    self.addons.push(SelectedAddon {
                        addon_id,
                        quantity: 1,
                    });
                }
            }
            SessionEvent::CouponApplied(coupon) => self.coupon = Some(coupon),
            SessionEvent::CouponCleared => self.coupon = None,
            SessionEvent::HoldPlaced(hold) => {
                let matches = self.selection().is_some_and(|sel| {
                    hold.covers(&sel.theme_id, sel.booking_date, sel.start_time)
                });
                if matches {
                    self.hold = Some(hold);
                } else {
                    tracing::debug!(hold = %hold.id, "Ignoring hold for a different selection");
                    return Applied::Discarded;
                }
            }
            SessionEvent::HoldReleased => self.hold = None,
            SessionEvent::AddedToCart => self.add_to_cart(),
            SessionEvent::CartItemRemoved(index) => {
                if index < self.cart.len() {
                    self.cart.remove(index);
                }
            }
            SessionEvent::BookingCompleted(booking) => {
                self.completed = Some(booking);
                self.clear_day();
                self.coupon = None;
                self.cart.clear();
            }
            SessionEvent::Reset => {
                let catalog = Arc::clone(&self.catalog);
                *self = Self::new(catalog);
            }
        }

        self.recompute();
        Applied::Updated
    }

    fn clear_day(&mut self) {
        self.slots.clear();
        self.selected_slot = None;
        self.hold = None;
        self.totals = None;
    }

    fn add_to_cart(&mut self) {
        if !self.catalog.studio.settings.cart_mode_enabled {
            self.notice = Some(Notice {
                field: None,
                message: "Cart mode is not enabled for this studio".to_string(),
            });
            return;
        }
        let (Some(selection), Some(totals), Some(slot)) =
            (self.selection(), self.totals, self.selected_slot.as_ref())
        else {
            self.notice = Some(Notice {
                field: Some("start_time".to_string()),
                message: "Pick a slot before adding to cart".to_string(),
            });
            return;
        };

        self.cart.push(CartItem {
            selection,
            end_time: slot.end,
            totals,
        });
        self.selected_slot = None;
        self.hold = None;
        self.addons.clear();
    }

    fn recompute(&mut self) {
        self.totals = None;
        let (Some(theme_id), Some(slot)) = (self.theme_id.as_deref(), self.selected_slot.as_ref())
        else {
            return;
        };

        let result = self.catalog.theme(theme_id).and_then(|theme| {
            let addons = resolve_addons(&self.catalog.addons, &self.addons)?;
            calculate_totals(&TotalsInput {
                theme,
                base_price: slot.price,
                pax_count: self.pax_count,
                addons: &addons,
                coupon: self.coupon.as_ref(),
                settings: &self.catalog.studio.settings,
            })
        });

        match result {
            Ok(totals) => self.totals = Some(totals),
            Err(err) => {
                if self.notice.is_none() {
                    self.notice = Some(Notice::from(&err));
                }
            }
        }
    }
}

//! Per-booking monetary breakdown.
//!
//! Every amount is an integer in minor currency units and every division
//! rounds half-up on the spot, so the same inputs always reproduce the
//! figures the backend computes for reconciliation.

use serde::{Deserialize, Serialize};

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        booking::SelectedAddon,
        coupon::{Coupon, CouponKind},
        studio::{PaymentType, StudioSettings},
        theme::{Addon, PaxPolicy, Theme},
    },
    pricing::div_round_half_up,
};

#[derive(Debug, Clone, Copy)]
pub struct AddonLine<'a> {
    pub addon: &'a Addon,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct TotalsInput<'a> {
    pub theme: &'a Theme,
    /// Session price after pricing rules.
    pub base_price: i64,
    pub pax_count: u32,
    pub addons: &'a [AddonLine<'a>],
    pub coupon: Option<&'a Coupon>,
    pub settings: &'a StudioSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingTotals {
    pub base_price: i64,
    pub extra_pax_fee: i64,
    pub addons_total: i64,
    pub subtotal: i64,
    pub discount_amount: i64,
    pub total_amount: i64,
    pub deposit_amount: i64,
    pub balance_amount: i64,
}

pub fn extra_pax_fee(theme: &Theme, pax_count: u32) -> BookingResult<i64> {
    if pax_count == 0 {
        return Err(BookingError::validation("pax_count", "At least one person is required"));
    }
    if let Some(ceiling) = theme.headcount_ceiling()
        && pax_count > ceiling
    {
        return Err(BookingError::validation(
            "pax_count",
            format!("{} allows at most {ceiling} people", theme.name),
        ));
    }

    match theme.pax_policy {
        PaxPolicy::Strict => Ok(0),
        PaxPolicy::Soft => {
            let extra = pax_count.saturating_sub(theme.base_pax);
            Ok(i64::from(extra) * theme.extra_pax_price)
        }
    }
}

pub fn addons_total(lines: &[AddonLine<'_>]) -> BookingResult<i64> {
    lines.iter().try_fold(0i64, |sum, line| {
        if line.quantity == 0 {
            return Err(BookingError::validation(
                "selected_addons",
                format!("Quantity for {} must be at least 1", line.addon.name),
            ));
        }
        if let Some(max) = line.addon.max_quantity
            && line.quantity > max
        {
            return Err(BookingError::validation(
                "selected_addons",
                format!("{} is limited to {max}", line.addon.name),
            ));
        }
        Ok(sum + line.addon.price * i64::from(line.quantity))
    })
}

/// Discount a coupon grants on `subtotal`.
pub fn discount_amount(coupon: &Coupon, subtotal: i64) -> BookingResult<i64> {
    if let Some(min_spend) = coupon.min_spend
        && subtotal < min_spend
    {
        return Err(BookingError::validation(
            "coupon_code",
            format!("Coupon {} requires a minimum spend of {min_spend}", coupon.code),
        ));
    }

    Ok(match coupon.kind {
        CouponKind::Percentage => div_round_half_up(subtotal * coupon.value, 100),
        CouponKind::Fixed => coupon.value.min(subtotal),
    })
}

/// Splits `total` into `(deposit, balance)` according to the payment policy.
pub fn deposit_split(total: i64, settings: &StudioSettings) -> (i64, i64) {
    let deposit = match settings.payment_type {
        PaymentType::Full => total,
        PaymentType::Deposit => {
            div_round_half_up(total * i64::from(settings.deposit_percentage), 100)
        }
    };
    (deposit, total - deposit)
}

pub fn calculate_totals(input: &TotalsInput<'_>) -> BookingResult<BookingTotals> {
    let extra_pax_fee = extra_pax_fee(input.theme, input.pax_count)?;
    let addons_total = addons_total(input.addons)?;
    let subtotal = input.base_price + extra_pax_fee + addons_total;

    let discount_amount = match input.coupon {
        Some(coupon) => discount_amount(coupon, subtotal)?,
        None => 0,
    };

    let total_amount = (subtotal - discount_amount).max(0);
    let (deposit_amount, balance_amount) = deposit_split(total_amount, input.settings);

    Ok(BookingTotals {
        base_price: input.base_price,
        extra_pax_fee,
        addons_total,
        subtotal,
        discount_amount,
        total_amount,
        deposit_amount,
        balance_amount,
    })
}

/// Pairs the customer's add-on picks with catalog entries.
pub fn resolve_addons<'a>(
    catalog: &'a [Addon],
    selected: &[SelectedAddon],
) -> BookingResult<Vec<AddonLine<'a>>> {
    selected
        .iter()
        .map(|pick| {
            catalog
                .iter()
                .find(|addon| addon.id == pick.addon_id && addon.is_active())
                .map(|addon| AddonLine {
                    addon,
                    quantity: pick.quantity,
                })
                .ok_or_else(|| {
                    BookingError::validation(
                        "selected_addons",
                        format!("Add-on {} is not available", pick.addon_id),
                    )
                })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartSummary {
    pub item_count: usize,
    pub total_amount: i64,
    pub deposit_amount: i64,
    pub balance_amount: i64,
}

/// Totals across several bookings checked out together in cart mode.
pub fn cart_summary(items: &[BookingTotals], settings: &StudioSettings) -> CartSummary {
    let total_amount = items.iter().map(|t| t.total_amount).sum();
    let (deposit_amount, balance_amount) = deposit_split(total_amount, settings);
    CartSummary {
        item_count: items.len(),
        total_amount,
        deposit_amount,
        balance_amount,
    }
}

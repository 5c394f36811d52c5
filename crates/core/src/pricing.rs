//! Date-scoped price overrides.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    pricing_rule::{PricingRule, PricingRuleKind},
    theme::Theme,
};

/// Effective price of a theme on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    pub price: i64,
    pub is_special_pricing: bool,
    pub label: Option<String>,
}

/// `numerator / denominator` rounded half-up. `denominator` must be positive.
pub fn div_round_half_up(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

/// Applies the first active rule covering `date` and `theme`, in listed order.
pub fn resolve_price(rules: &[PricingRule], theme: &Theme, date: NaiveDate) -> ResolvedPrice {
    let Some(rule) = rules.iter().find(|rule| rule.matches(date, &theme.id)) else {
        return ResolvedPrice {
            price: theme.base_price,
            is_special_pricing: false,
            label: None,
        };
    };

    let price = match rule.rule_type {
        PricingRuleKind::PercentageIncrease => {
            div_round_half_up(theme.base_price * (100 + rule.value), 100)
        }
        PricingRuleKind::FixedPrice => rule.value,
    };

    tracing::debug!(rule = %rule.name, theme = %theme.id, %date, price, "Pricing rule applied");

    ResolvedPrice {
        price: price.max(0),
        is_special_pricing: true,
        label: Some(rule.name.clone()),
    }
}

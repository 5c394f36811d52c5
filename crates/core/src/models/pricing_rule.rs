use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::theme::CatalogStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingRuleKind {
    /// `value` is a percentage added on top of the base price.
    PercentageIncrease,
    /// `value` replaces the price outright.
    FixedPrice,
}

/// Which themes a pricing rule applies to: the keyword `"all"` or a list of ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawThemeScope", into = "RawThemeScope")]
pub enum ThemeScope {
    All,
    Themes(Vec<String>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawThemeScope {
    Keyword(String),
    Themes(Vec<String>),
}

impl TryFrom<RawThemeScope> for ThemeScope {
    type Error = String;

    fn try_from(raw: RawThemeScope) -> Result<Self, Self::Error> {
        match raw {
            RawThemeScope::Keyword(k) if k == "all" => Ok(Self::All),
            RawThemeScope::Keyword(other) => Err(format!("unknown theme scope {other:?}")),
            RawThemeScope::Themes(ids) => Ok(Self::Themes(ids)),
        }
    }
}

impl From<ThemeScope> for RawThemeScope {
    fn from(scope: ThemeScope) -> Self {
        match scope {
            ThemeScope::All => Self::Keyword("all".to_string()),
            ThemeScope::Themes(ids) => Self::Themes(ids),
        }
    }
}

impl ThemeScope {
    pub fn includes(&self, theme_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Themes(ids) => ids.iter().any(|id| id == theme_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRule {
    pub id: String,
    pub name: String,
    pub date_range_start: NaiveDate,
    pub date_range_end: NaiveDate,
    pub rule_type: PricingRuleKind,
    pub value: i64,
    pub applies_to_themes: ThemeScope,
    pub status: CatalogStatus,
}

impl PricingRule {
    pub fn matches(&self, date: NaiveDate, theme_id: &str) -> bool {
        self.status == CatalogStatus::Active
            && self.date_range_start <= date
            && date <= self.date_range_end
            && self.applies_to_themes.includes(theme_id)
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BRAND_COLOR: &str = "#A8DADC";
pub const DEFAULT_CART_HOLD_MINUTES: u32 = 10;
pub const DEFAULT_DEPOSIT_PERCENTAGE: u32 = 50;
pub const DEFAULT_BUFFER_MINUTES: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    BM,
    EN,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Self::BM => Self::EN,
            Self::EN => Self::BM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudioStatus {
    Trial,
    Active,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Pay `deposit_percentage` of the total up front.
    #[default]
    Deposit,
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioSettings {
    #[serde(default)]
    pub cart_mode_enabled: bool,
    #[serde(default = "default_cart_hold_duration")]
    pub cart_hold_duration: u32,
    #[serde(default = "default_deposit_percentage")]
    pub deposit_percentage: u32,
    #[serde(default)]
    pub payment_type: PaymentType,
    #[serde(default)]
    pub booking_window_start: Option<NaiveDate>,
    #[serde(default)]
    pub booking_window_end: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub booking_open: bool,
    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: u32,
    #[serde(default)]
    pub auto_cutoff_hours: u32,
}

fn default_cart_hold_duration() -> u32 {
    DEFAULT_CART_HOLD_MINUTES
}

fn default_deposit_percentage() -> u32 {
    DEFAULT_DEPOSIT_PERCENTAGE
}

fn default_buffer_minutes() -> u32 {
    DEFAULT_BUFFER_MINUTES
}

fn default_true() -> bool {
    true
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            cart_mode_enabled: false,
            cart_hold_duration: DEFAULT_CART_HOLD_MINUTES,
            deposit_percentage: DEFAULT_DEPOSIT_PERCENTAGE,
            payment_type: PaymentType::Deposit,
            booking_window_start: None,
            booking_window_end: None,
            booking_open: true,
            buffer_minutes: DEFAULT_BUFFER_MINUTES,
            auto_cutoff_hours: 0,
        }
    }
}

impl StudioSettings {
    /// Whether the studio accepts bookings for `date` at all.
    pub fn accepts_date(&self, date: NaiveDate) -> bool {
        self.booking_open
            && self.booking_window_start.is_none_or(|start| date >= start)
            && self.booking_window_end.is_none_or(|end| date <= end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Studio {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub maps_link: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub brand_color: Option<String>,
    #[serde(default)]
    pub default_language: Language,
    pub timezone: String,
    pub currency: String,
    pub status: StudioStatus,
    #[serde(default)]
    pub settings: StudioSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Studio {
    pub fn brand_color(&self) -> &str {
        self.brand_color.as_deref().unwrap_or(DEFAULT_BRAND_COLOR)
    }

    /// The studio's timezone, UTC when the stored name is not a known zone.
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(studio = %self.slug, timezone = %self.timezone, "Unknown timezone, using UTC");
            Tz::UTC
        })
    }

    /// Calendar date "today" at the studio.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz()).date_naive()
    }

    pub fn is_suspended(&self) -> bool {
        self.status == StudioStatus::Suspended
    }
}

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use studiobook_core::{
    catalog::Catalog,
    models::{
        coupon::{Coupon, CouponKind},
        pricing_rule::{PricingRule, PricingRuleKind, ThemeScope},
        schedule::{BlackoutDate, BreakTime, TimeOfDay, WorkingHours},
        studio::{Language, Studio, StudioSettings, StudioStatus},
        theme::{Addon, CatalogStatus, PaxPolicy, Theme},
    },
};

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

pub fn tod(s: &str) -> TimeOfDay {
    s.parse().expect("valid time of day")
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Long before any date used in the tests.
pub fn long_ago() -> DateTime<Utc> {
    utc(2025, 1, 1, 0, 0)
}

pub fn studio() -> Studio {
    Studio {
        id: "studio-001".to_string(),
        slug: "najiahstudio".to_string(),
        name: "Najiah Photography".to_string(),
        owner_name: "Siti Najiah".to_string(),
        whatsapp: "0129876543".to_string(),
        instagram: None,
        address: "Bangsar, Kuala Lumpur".to_string(),
        maps_link: String::new(),
        logo_url: String::new(),
        brand_color: None,
        default_language: Language::BM,
        timezone: "Asia/Kuala_Lumpur".to_string(),
        currency: "MYR".to_string(),
        status: StudioStatus::Active,
        settings: StudioSettings::default(),
        created_at: long_ago(),
        updated_at: long_ago(),
    }
}

pub fn theme() -> Theme {
    Theme {
        id: "theme-001".to_string(),
        name: "Keluarga Bahagia".to_string(),
        description_short: String::new(),
        description_long: String::new(),
        images: Vec::new(),
        base_price: 180,
        base_pax: 5,
        extra_pax_price: 30,
        duration_minutes: 30,
        buffer_minutes: None,
        pax_policy: PaxPolicy::Soft,
        max_pax: None,
        status: CatalogStatus::Active,
        sort_order: 1,
    }
}

pub fn addon(id: &str, price: i64, max_quantity: Option<u32>) -> Addon {
    Addon {
        id: id.to_string(),
        name: format!("Addon {id}"),
        price,
        max_quantity,
        status: CatalogStatus::Active,
        sort_order: 0,
        image: None,
    }
}

pub fn hours(day_of_week: u8, start: &str, end: &str) -> WorkingHours {
    WorkingHours {
        id: format!("wh-{day_of_week}"),
        day_of_week,
        active: true,
        start: tod(start),
        end: tod(end),
        applies_to_date_range: None,
    }
}

pub fn weekday_hours(start: &str, end: &str) -> Vec<WorkingHours> {
    (1..=5).map(|day| hours(day, start, end)).collect()
}

pub fn break_time(start: &str, end: &str, days: &[u8]) -> BreakTime {
    BreakTime {
        id: "break-1".to_string(),
        name: "Lunch Break".to_string(),
        start_time: tod(start),
        end_time: tod(end),
        days_of_week: days.to_vec(),
    }
}

pub fn blackout(start: &str, end: Option<&str>) -> BlackoutDate {
    BlackoutDate {
        id: "blackout-1".to_string(),
        title: "Public Holiday".to_string(),
        start_date: date(start),
        end_date: end.map(date),
        reason: "Closed".to_string(),
    }
}

pub fn rule(name: &str, start: &str, end: &str, kind: PricingRuleKind, value: i64) -> PricingRule {
    PricingRule {
        id: format!("rule-{name}"),
        name: name.to_string(),
        date_range_start: date(start),
        date_range_end: date(end),
        rule_type: kind,
        value,
        applies_to_themes: ThemeScope::All,
        status: CatalogStatus::Active,
    }
}

pub fn coupon(kind: CouponKind, value: i64, min_spend: Option<i64>) -> Coupon {
    Coupon {
        id: "coupon-1".to_string(),
        code: "EARLYBIRD".to_string(),
        kind,
        value,
        valid_from: None,
        valid_until: None,
        usage_limit: None,
        usage_count: 0,
        min_spend,
        status: CatalogStatus::Active,
    }
}

pub fn catalog() -> Catalog {
    Catalog {
        studio: studio(),
        themes: vec![theme()],
        addons: vec![addon("addon-001", 50, Some(2)), addon("addon-002", 25, None)],
        working_hours: weekday_hours("09:00", "12:00"),
        break_times: Vec::new(),
        blackout_dates: Vec::new(),
        pricing_rules: Vec::new(),
    }
}

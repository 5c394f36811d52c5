use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogStatus {
    Active,
    Inactive,
}

/// How a theme treats headcount above `base_pax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaxPolicy {
    /// `base_pax` is a hard ceiling.
    Strict,
    /// Extra people are billed at `extra_pax_price`, up to `max_pax` if set.
    #[default]
    Soft,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description_short: String,
    #[serde(default)]
    pub description_long: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub base_price: i64,
    pub base_pax: u32,
    #[serde(default)]
    pub extra_pax_price: i64,
    pub duration_minutes: u32,
    /// `None` falls back to the studio's default buffer.
    #[serde(default)]
    pub buffer_minutes: Option<u32>,
    #[serde(default)]
    pub pax_policy: PaxPolicy,
    #[serde(default)]
    pub max_pax: Option<u32>,
    pub status: CatalogStatus,
    #[serde(default)]
    pub sort_order: i32,
}

impl Theme {
    pub fn is_active(&self) -> bool {
        self.status == CatalogStatus::Active
    }

    pub fn buffer_or(&self, studio_default: u32) -> u32 {
        self.buffer_minutes.unwrap_or(studio_default)
    }

    /// Largest headcount this theme accepts, if bounded.
    pub fn headcount_ceiling(&self) -> Option<u32> {
        match self.pax_policy {
            PaxPolicy::Strict => Some(self.base_pax),
            PaxPolicy::Soft => self.max_pax,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Addon {
    pub id: String,
    pub name: String,
    pub price: i64,
    /// `None` = unlimited.
    #[serde(default)]
    pub max_quantity: Option<u32>,
    pub status: CatalogStatus,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub image: Option<String>,
}

impl Addon {
    pub fn is_active(&self) -> bool {
        self.status == CatalogStatus::Active
    }
}

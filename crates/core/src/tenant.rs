//! Resolves which studio a request belongs to.
//!
//! Production traffic arrives on `<slug>.<domain>`; development hosts fall
//! back through an explicit chain: `?studio=` override, the slug remembered
//! for the browser session, a recently saved booking in progress, and
//! finally a configured default.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const DEV_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];
pub const RESERVED_SUBDOMAINS: [&str; 3] = ["www", "api", "admin"];
pub const SAVED_STATE_MAX_AGE_MINUTES: i64 = 30;

/// Snapshot of an unfinished booking the widget persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedBookingState {
    pub studio_slug: Option<String>,
    #[serde(default)]
    pub selected_theme: Option<String>,
    #[serde(default)]
    pub current_step: u32,
    #[serde(default)]
    pub cart_items: usize,
    pub saved_at: DateTime<Utc>,
}

impl SavedBookingState {
    pub fn has_meaningful_progress(&self) -> bool {
        self.selected_theme.is_some() || self.current_step > 1 || self.cart_items > 0
    }

    fn usable_slug(&self, now: DateTime<Utc>) -> Option<&str> {
        let fresh = now - self.saved_at <= Duration::minutes(SAVED_STATE_MAX_AGE_MINUTES);
        if fresh && self.has_meaningful_progress() {
            self.studio_slug.as_deref().filter(|s| !s.is_empty())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct TenantHints<'a> {
    /// Host as received, possibly with a port.
    pub host: &'a str,
    pub query_slug: Option<&'a str>,
    pub session_slug: Option<&'a str>,
    pub saved_state: Option<&'a SavedBookingState>,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlugSource {
    Subdomain,
    QueryParam,
    Session,
    SavedState,
    DevDefault,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTenant {
    pub slug: String,
    pub source: SlugSource,
}

impl ResolvedTenant {
    /// Development resolutions are remembered for the rest of the session.
    pub fn should_persist(&self) -> bool {
        self.source != SlugSource::Subdomain
    }
}

/// Hostname without port, lowercased.
pub fn hostname(host: &str) -> String {
    host.split(':').next().unwrap_or_default().trim().to_ascii_lowercase()
}

pub fn is_dev_host(host: &str) -> bool {
    DEV_HOSTS.contains(&hostname(host).as_str())
}

/// `najiahstudio.sesifoto.my` → `najiahstudio`.
pub fn slug_from_hostname(host: &str) -> Option<String> {
    let name = hostname(host);
    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 3 {
        return None;
    }
    let slug = labels[0];
    if slug.is_empty() || RESERVED_SUBDOMAINS.contains(&slug) {
        return None;
    }
    Some(slug.to_string())
}

pub fn resolve_studio_slug(hints: &TenantHints<'_>, dev_default: &str) -> Option<ResolvedTenant> {
    let resolved = |slug: &str, source| ResolvedTenant {
        slug: slug.to_string(),
        source,
    };
    let non_empty = |s: &&str| !s.trim().is_empty();

    if !is_dev_host(hints.host) {
        return slug_from_hostname(hints.host).map(|slug| ResolvedTenant {
            slug,
            source: SlugSource::Subdomain,
        });
    }

    if let Some(slug) = hints.query_slug.filter(non_empty) {
        return Some(resolved(slug.trim(), SlugSource::QueryParam));
    }
    if let Some(slug) = hints.session_slug.filter(non_empty) {
        return Some(resolved(slug.trim(), SlugSource::Session));
    }
    if let Some(slug) = hints.saved_state.and_then(|state| state.usable_slug(hints.now)) {
        return Some(resolved(slug, SlugSource::SavedState));
    }
    Some(resolved(dev_default, SlugSource::DevDefault)).filter(|t| !t.slug.is_empty())
}

/// Public URL of a studio's storefront as seen from `host`.
pub fn studio_url(slug: &str, host: &str, port: Option<u16>) -> String {
    let name = hostname(host);
    if is_dev_host(&name) {
        return match port {
            Some(port) => format!("http://{name}:{port}?studio={slug}"),
            None => format!("http://{name}?studio={slug}"),
        };
    }

    let labels: Vec<&str> = name.split('.').collect();
    let domain = labels[labels.len().saturating_sub(2)..].join(".");
    format!("https://{slug}.{domain}")
}

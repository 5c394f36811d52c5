use studiobook_core::{
    catalog::Catalog,
    errors::{BookingError, BookingResult},
};

use crate::StudioBackend;

/// Fetches a studio and all of its configuration collections.
///
/// The studio itself is fetched first so an unknown or suspended slug fails
/// fast with [`BookingError::TenantNotFound`]; the collections are then
/// requested concurrently.
pub async fn load_catalog(backend: &dyn StudioBackend, slug: &str) -> BookingResult<Catalog> {
    let studio = backend.get_studio(slug).await?;
    if studio.is_suspended() {
        tracing::debug!(studio = %slug, "Studio is suspended");
        return Err(BookingError::TenantNotFound(slug.to_string()));
    }

    let (themes, addons, working_hours, break_times, blackout_dates, pricing_rules) = tokio::try_join!(
        backend.get_themes(slug),
        backend.get_addons(slug),
        backend.get_working_hours(slug),
        backend.get_break_times(slug),
        backend.get_blackout_dates(slug),
        backend.get_pricing_rules(slug),
    )?;

    tracing::debug!(
        studio = %slug,
        themes = themes.len(),
        addons = addons.len(),
        pricing_rules = pricing_rules.len(),
        "Loaded catalog"
    );

    Ok(Catalog {
        studio,
        themes,
        addons,
        working_hours,
        break_times,
        blackout_dates,
        pricing_rules,
    })
}

/// Slot and date-summary handlers
pub mod availability;
/// Quote, booking submission and lookup handlers
pub mod booking;
/// Cart hold handlers
pub mod hold;
/// Studio profile handler
pub mod studio;

use studiobook_client::load_catalog;
use studiobook_core::{
    catalog::Catalog,
    errors::{BookingError, BookingResult},
    models::{schedule::TimeOfDay, theme::Theme},
};

use crate::{middleware::tenant::Tenant, StorefrontState};

/// The tenant's full configuration, fresh from the backend.
pub(crate) async fn load(state: &StorefrontState, tenant: &Tenant) -> BookingResult<Catalog> {
    load_catalog(state.backend.as_ref(), tenant.slug()).await
}

/// End of a session of `theme` starting at `start`.
pub(crate) fn session_end(theme: &Theme, start: TimeOfDay) -> BookingResult<TimeOfDay> {
    start
        .checked_add_minutes(theme.duration_minutes)
        .ok_or_else(|| BookingError::validation("start_time", "Session would run past midnight"))
}

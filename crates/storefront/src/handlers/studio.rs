use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use studiobook_core::{
    models::{
        studio::Studio,
        theme::{Addon, Theme},
    },
    tenant::SlugSource,
};

use super::load;
use crate::{
    middleware::{error_handling::AppError, tenant::Tenant},
    StorefrontState,
};

/// Everything the widget needs to render the studio's landing step.
#[derive(Debug, Serialize, Deserialize)]
pub struct StudioResponse {
    pub studio: Studio,
    /// Brand colour with the default applied
    pub brand_color: String,
    /// Active themes by `sort_order`
    pub themes: Vec<Theme>,
    /// Active add-ons by `sort_order`
    pub addons: Vec<Addon>,
    pub source: SlugSource,
}

/// Studio profile and catalog. Remembers a development override in the
/// session cookie.
#[axum::debug_handler(state = Arc<StorefrontState>)]
pub async fn get_studio(
    State(state): State<Arc<StorefrontState>>,
    tenant: Tenant,
) -> Result<Response, AppError> {
    let catalog = load(&state, &tenant).await?;

    let body = StudioResponse {
        brand_color: catalog.studio.brand_color().to_string(),
        themes: catalog.active_themes().into_iter().cloned().collect(),
        addons: catalog.active_addons().into_iter().cloned().collect(),
        source: tenant.0.source,
        studio: catalog.studio,
    };

    let mut response = Json(body).into_response();
    if let Some(cookie) = tenant.session_cookie() {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    Ok(response)
}

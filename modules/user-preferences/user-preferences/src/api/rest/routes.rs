use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};
use ledgerkit::{Problem, ValidationViolation};
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::domain::service::Service;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::get_preferences, handlers::update_preferences),
    components(schemas(
        dto::PreferencesDto,
        dto::UpdatePreferencesRequest,
        Problem,
        ValidationViolation,
    )),
    tags((name = "Preferences", description = "Per-user display preferences"))
)]
pub struct PreferencesApiDoc;

/// Preference routes; the caller adds the auth layer.
#[must_use]
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/user/preferences",
            get(handlers::get_preferences).put(handlers::update_preferences),
        )
        .layer(Extension(service))
}

use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::extract::rejection::JsonRejection;
use axum::http::Uri;
use ledgerkit::{Authz, Problem};

use crate::domain::service::Service;

use super::dto::{PreferencesDto, UpdatePreferencesRequest};
use super::error::domain_error_to_problem;

#[utoipa::path(
    get,
    path = "/user/preferences",
    tag = "Preferences",
    operation_id = "preferences.get",
    summary = "Get the caller's preferences, or the defaults",
    responses(
        (status = 200, body = PreferencesDto),
        (status = 401, body = Problem),
        (status = 500, body = Problem),
    )
)]
pub async fn get_preferences(
    Authz(principal): Authz,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> Result<Json<PreferencesDto>, Problem> {
    let prefs = svc
        .get_preferences(&principal)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(prefs.into()))
}

#[utoipa::path(
    put,
    path = "/user/preferences",
    tag = "Preferences",
    operation_id = "preferences.update",
    summary = "Save the caller's preferences",
    request_body = UpdatePreferencesRequest,
    responses(
        (status = 200, body = PreferencesDto),
        (status = 400, body = Problem),
        (status = 401, body = Problem),
        (status = 500, body = Problem),
    )
)]
pub async fn update_preferences(
    Authz(principal): Authz,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<UpdatePreferencesRequest>, JsonRejection>,
) -> Result<Json<PreferencesDto>, Problem> {
    let Json(req) = body.map_err(|e| Problem::from(e).with_instance(uri.path()))?;
    let prefs = svc
        .update_preferences(&principal, req.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(prefs.into()))
}

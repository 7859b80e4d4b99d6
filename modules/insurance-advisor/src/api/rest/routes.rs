use std::sync::Arc;

use axum::routing::post;
use axum::{Extension, Router};
use ledgerkit::{Problem, ValidationViolation};
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::domain::service::Service;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::chat),
    components(schemas(
        dto::ChatRequestDto,
        dto::ChatAssetDto,
        dto::ChatResponseDto,
        Problem,
        ValidationViolation,
    )),
    tags((name = "Advisor", description = "Insurance advice chat"))
)]
pub struct AdvisorApiDoc;

#[must_use]
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat))
        .layer(Extension(service))
}

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Extension, Router};
use ledgerkit::{Problem, ValidationViolation};
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::domain::proxy::ImageProxy;
use crate::domain::service::Service;

/// Multipart framing allowance on top of the image size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_assets,
        handlers::portfolio_summary,
        handlers::get_asset,
        handlers::create_asset,
        handlers::update_asset,
        handlers::delete_asset,
        handlers::upload_image,
        handlers::proxy_image,
        handlers::get_blob,
    ),
    components(schemas(
        dto::AssetDto,
        dto::ImageUrlsDto,
        dto::CreateAssetRequest,
        dto::UpdateAssetRequest,
        dto::DeletedDto,
        dto::PortfolioSummaryDto,
        dto::CategoryTotalDto,
        dto::UploadResponse,
        Problem,
        ValidationViolation,
    )),
    tags(
        (name = "Assets", description = "Household asset catalog"),
        (name = "Images", description = "Image upload, proxy and signed blob access"),
    )
)]
pub struct AssetsApiDoc;

/// Routes that need a resolved principal. The caller adds the auth layer.
#[must_use]
pub fn protected_router(
    service: Arc<Service>,
    proxy: Arc<ImageProxy>,
    max_upload_bytes: usize,
) -> Router {
    Router::new()
        .route(
            "/assets",
            get(handlers::list_assets).post(handlers::create_asset),
        )
        .route("/assets/summary", get(handlers::portfolio_summary))
        .route(
            "/assets/{id}",
            get(handlers::get_asset)
                .put(handlers::update_asset)
                .delete(handlers::delete_asset),
        )
        .route(
            "/upload",
            post(handlers::upload_image).layer(DefaultBodyLimit::max(
                max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
            )),
        )
        .route("/proxy-image", get(handlers::proxy_image))
        .layer(Extension(proxy))
        .layer(Extension(service))
}

/// Signature-protected blob reads.
#[must_use]
pub fn public_router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/blobs/{name}", get(handlers::get_blob))
        .layer(Extension(service))
}

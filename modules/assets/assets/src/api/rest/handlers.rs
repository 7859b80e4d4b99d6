use std::sync::Arc;

use assets_sdk::models::{AssetPatch, NewAsset};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Extension, Multipart, Path, Query};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use ledgerkit::{Authz, Problem};
use uuid::Uuid;

use crate::domain::blob::StoredBlob;
use crate::domain::error::DomainError;
use crate::domain::fields::AssetFields;
use crate::domain::proxy::ImageProxy;
use crate::domain::service::Service;

use super::dto::{
    AssetDto, BlobQuery, CreateAssetRequest, DeletedDto, PortfolioSummaryDto, ProxyQuery,
    UpdateAssetRequest, UploadResponse,
};
use super::error::{bad_id, domain_error_to_problem};

pub const PROXY_CACHE_CONTROL: &str = "private, max-age=3600";

type ApiResult<T> = Result<T, Problem>;

fn parse_id(raw: &str, uri: &Uri) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| bad_id(raw, uri.path()))
}

fn problem(uri: &Uri) -> impl Fn(DomainError) -> Problem + '_ {
    move |e| domain_error_to_problem(&e, uri.path())
}

fn body_problem(uri: &Uri) -> impl Fn(JsonRejection) -> Problem + '_ {
    move |e| Problem::from(e).with_instance(uri.path())
}

#[utoipa::path(
    get,
    path = "/assets",
    tag = "Assets",
    operation_id = "assets.list",
    summary = "List the household's assets, newest first",
    responses(
        (status = 200, body = [AssetDto]),
        (status = 401, body = Problem),
        (status = 500, body = Problem),
    )
)]
pub async fn list_assets(
    Authz(principal): Authz,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> ApiResult<Json<Vec<AssetDto>>> {
    let assets = svc.list_assets(&principal).await.map_err(problem(&uri))?;
    Ok(Json(assets.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/assets/summary",
    tag = "Assets",
    operation_id = "assets.summary",
    summary = "Total value of the household's assets by category",
    responses(
        (status = 200, body = PortfolioSummaryDto),
        (status = 401, body = Problem),
        (status = 500, body = Problem),
    )
)]
pub async fn portfolio_summary(
    Authz(principal): Authz,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> ApiResult<Json<PortfolioSummaryDto>> {
    let summary = svc
        .portfolio_summary(&principal)
        .await
        .map_err(problem(&uri))?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "Assets",
    operation_id = "assets.get",
    params(("id" = String, Path, description = "Asset id")),
    responses(
        (status = 200, body = AssetDto),
        (status = 400, body = Problem),
        (status = 401, body = Problem),
        (status = 404, body = Problem),
    )
)]
pub async fn get_asset(
    Authz(principal): Authz,
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
    uri: Uri,
) -> ApiResult<Json<AssetDto>> {
    let id = parse_id(&raw_id, &uri)?;
    let asset = svc.get_asset(&principal, id).await.map_err(problem(&uri))?;
    Ok(Json(asset.into()))
}

#[utoipa::path(
    post,
    path = "/assets",
    tag = "Assets",
    operation_id = "assets.create",
    request_body = CreateAssetRequest,
    responses(
        (status = 201, body = AssetDto),
        (status = 400, body = Problem),
        (status = 401, body = Problem),
    )
)]
pub async fn create_asset(
    Authz(principal): Authz,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<CreateAssetRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AssetDto>)> {
    let Json(req) = body.map_err(body_problem(&uri))?;
    let new_asset = NewAsset::try_from(req).map_err(problem(&uri))?;
    let asset = svc
        .create_asset(&principal, new_asset)
        .await
        .map_err(problem(&uri))?;
    Ok((StatusCode::CREATED, Json(asset.into())))
}

#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "Assets",
    operation_id = "assets.update",
    params(("id" = String, Path, description = "Asset id")),
    request_body = UpdateAssetRequest,
    responses(
        (status = 200, body = AssetDto),
        (status = 400, body = Problem),
        (status = 401, body = Problem),
        (status = 404, body = Problem),
    )
)]
pub async fn update_asset(
    Authz(principal): Authz,
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
    uri: Uri,
    body: Result<Json<UpdateAssetRequest>, JsonRejection>,
) -> ApiResult<Json<AssetDto>> {
    let id = parse_id(&raw_id, &uri)?;
    let Json(req) = body.map_err(body_problem(&uri))?;
    let patch = AssetPatch::try_from(req).map_err(problem(&uri))?;
    let asset = svc
        .update_asset(&principal, id, patch)
        .await
        .map_err(problem(&uri))?;
    Ok(Json(asset.into()))
}

#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "Assets",
    operation_id = "assets.delete",
    params(("id" = String, Path, description = "Asset id")),
    responses(
        (status = 200, body = DeletedDto),
        (status = 400, body = Problem),
        (status = 401, body = Problem),
        (status = 404, body = Problem),
    )
)]
pub async fn delete_asset(
    Authz(principal): Authz,
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
    uri: Uri,
) -> ApiResult<Json<DeletedDto>> {
    let id = parse_id(&raw_id, &uri)?;
    svc.delete_asset(&principal, id)
        .await
        .map_err(problem(&uri))?;
    Ok(Json(DeletedDto { id, deleted: true }))
}

struct UploadPart {
    bytes: Bytes,
    content_type: Option<String>,
    file_name: Option<String>,
}

/// Part named `image` or `file`, else the first part carrying a file name.
async fn pick_image_part(multipart: &mut Multipart) -> Result<Option<UploadPart>, MultipartError> {
    let mut fallback = None;
    while let Some(field) = multipart.next_field().await? {
        let named = matches!(field.name(), Some("image" | "file"));
        let file_name = field.file_name().map(str::to_owned);
        if !named && (fallback.is_some() || file_name.is_none()) {
            continue;
        }
        let content_type = field.content_type().map(str::to_owned);
        let part = UploadPart {
            bytes: field.bytes().await?,
            content_type,
            file_name,
        };
        if named {
            return Ok(Some(part));
        }
        fallback = Some(part);
    }
    Ok(fallback)
}

fn multipart_problem(status: StatusCode, detail: String, uri: &Uri) -> Problem {
    Problem::new(
        status,
        status.canonical_reason().unwrap_or("Bad Request"),
        detail,
    )
    .with_code("assets.invalid_upload")
    .with_instance(uri.path())
    .with_current_trace()
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Images",
    operation_id = "images.upload",
    request_body(content_type = "multipart/form-data", description = "Image in an `image` or `file` part"),
    responses(
        (status = 200, body = UploadResponse),
        (status = 400, body = Problem),
        (status = 401, body = Problem),
        (status = 413, body = Problem),
    )
)]
pub async fn upload_image(
    Authz(principal): Authz,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let mut multipart =
        multipart.map_err(|e| multipart_problem(e.status(), e.body_text(), &uri))?;
    let part = pick_image_part(&mut multipart)
        .await
        .map_err(|e| multipart_problem(e.status(), e.body_text(), &uri))?
        .ok_or_else(|| {
            domain_error_to_problem(
                &DomainError::validation(AssetFields::IMAGE, "no image part in upload"),
                uri.path(),
            )
        })?;

    tracing::debug!(household_id = principal.household_id(), "image upload received");
    let urls = svc
        .images()
        .upload(
            part.bytes,
            part.content_type.as_deref(),
            part.file_name.as_deref(),
        )
        .await
        .map_err(problem(&uri))?;
    Ok(Json(urls.into()))
}

fn blob_response(blob: StoredBlob) -> Response {
    (
        [
            (header::CONTENT_TYPE, blob.content_type),
            (header::CACHE_CONTROL, PROXY_CACHE_CONTROL.to_owned()),
        ],
        blob.bytes,
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/proxy-image",
    tag = "Images",
    operation_id = "images.proxy",
    params(ProxyQuery),
    responses(
        (status = 200, description = "Image bytes with the upstream content type"),
        (status = 400, body = Problem),
        (status = 401, body = Problem),
        (status = 404, body = Problem),
        (status = 500, body = Problem),
    )
)]
pub async fn proxy_image(
    Authz(_principal): Authz,
    Extension(proxy): Extension<Arc<ImageProxy>>,
    Query(query): Query<ProxyQuery>,
    uri: Uri,
) -> ApiResult<Response> {
    let url = query
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| DomainError::validation(AssetFields::URL, "is required"))
        .map_err(problem(&uri))?;
    let blob = proxy.fetch(url.trim()).await.map_err(problem(&uri))?;
    Ok(blob_response(blob))
}

#[utoipa::path(
    get,
    path = "/blobs/{name}",
    tag = "Images",
    operation_id = "images.blob",
    params(("name" = String, Path, description = "Blob name"), BlobQuery),
    responses(
        (status = 200, description = "Blob bytes"),
        (status = 404, body = Problem),
    )
)]
pub async fn get_blob(
    Extension(svc): Extension<Arc<Service>>,
    Path(name): Path<String>,
    Query(query): Query<BlobQuery>,
    uri: Uri,
) -> ApiResult<Response> {
    let expiry = query.se.as_deref().and_then(|s| s.parse::<i64>().ok());
    let blob = svc
        .images()
        .open_signed(&name, expiry, query.sig.as_deref())
        .await
        .map_err(problem(&uri))?;
    Ok(blob_response(blob))
}

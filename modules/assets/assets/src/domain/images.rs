use std::collections::BTreeSet;
use std::sync::Arc;

use assets_sdk::models::ImageUrls;
use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::blob::{
    BlobStore, StoredBlob, extension_for_content_type, image_type_from_file_name,
    is_valid_blob_name, original_name, rendition_names, with_sibling,
};
use super::error::DomainError;
use super::fields::AssetFields;
use super::signed_url::UrlSigner;
use crate::infra::imaging;

const JPEG: &str = "image/jpeg";

/// Upload, signed read access and best-effort deletion of asset images.
pub struct ImageService {
    store: Arc<dyn BlobStore>,
    signer: Arc<UrlSigner>,
    max_upload_bytes: usize,
}

impl ImageService {
    #[must_use]
    pub fn new(store: Arc<dyn BlobStore>, signer: Arc<UrlSigner>, max_upload_bytes: usize) -> Self {
        Self {
            store,
            signer,
            max_upload_bytes,
        }
    }

    #[must_use]
    pub fn signer(&self) -> &UrlSigner {
        &self.signer
    }

    /// Store an uploaded image as high and low JPEG renditions.
    ///
    /// Falls back to storing the original bytes, under one URL for both
    /// renditions, when the image cannot be re-encoded.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        bytes: Bytes,
        content_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<ImageUrls, DomainError> {
        let content_type = resolve_image_type(content_type, file_name)?;
        if bytes.is_empty() {
            return Err(DomainError::validation(AssetFields::IMAGE, "empty upload"));
        }
        if bytes.len() > self.max_upload_bytes {
            return Err(DomainError::validation(
                AssetFields::IMAGE,
                format!("exceeds maximum size of {} bytes", self.max_upload_bytes),
            ));
        }

        let stem = Uuid::new_v4().to_string();
        let input = bytes.clone();
        let rendered = tokio::task::spawn_blocking(move || imaging::reencode(&input)).await;

        match rendered {
            Ok(Ok(renditions)) => {
                let (high, low) = rendition_names(&stem);
                self.put(&high, Bytes::from(renditions.high), JPEG).await?;
                if let Err(e) = self.put(&low, Bytes::from(renditions.low), JPEG).await {
                    self.delete_names(std::iter::once(high)).await;
                    return Err(e);
                }
                info!(blob = %stem, "stored image renditions");
                let now = Utc::now();
                Ok(ImageUrls {
                    high: self.signer.sign(&high, now),
                    low: self.signer.sign(&low, now),
                })
            }
            Ok(Err(e)) => {
                warn!(error = %e, "re-encoding failed, storing original");
                self.store_original(&stem, bytes, &content_type).await
            }
            Err(e) => {
                warn!(error = %e, "re-encoding task failed, storing original");
                self.store_original(&stem, bytes, &content_type).await
            }
        }
    }

    async fn store_original(
        &self,
        stem: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<ImageUrls, DomainError> {
        let name = original_name(stem, extension_for_content_type(content_type));
        self.put(&name, bytes, content_type).await?;
        info!(blob = %name, "stored original image");
        Ok(ImageUrls::single(self.signer.sign(&name, Utc::now())))
    }

    async fn put(&self, name: &str, bytes: Bytes, content_type: &str) -> Result<(), DomainError> {
        self.store
            .put(name, bytes, content_type)
            .await
            .map_err(DomainError::storage)
    }

    /// Delete the blobs behind `urls` and their sibling renditions. URLs not
    /// issued by this server are skipped.
    ///
    /// Failures are logged and never returned.
    pub async fn delete_urls<'a>(&self, urls: impl IntoIterator<Item = &'a str>) {
        let mut names = BTreeSet::new();
        for url in urls {
            match self.signer.blob_name(url) {
                Some(name) => names.extend(with_sibling(&name)),
                None => warn!(url = %url, "image url is not a local blob, skipping delete"),
            }
        }
        self.delete_names(names).await;
    }

    async fn delete_names(&self, names: impl IntoIterator<Item = String>) {
        for name in names {
            match self.store.delete(&name).await {
                Ok(true) => debug!(blob = %name, "deleted blob"),
                Ok(false) => debug!(blob = %name, "blob already absent"),
                Err(e) => warn!(blob = %name, error = %e, "failed to delete blob"),
            }
        }
    }

    /// Read a blob through a signed URL's components.
    ///
    /// Bad signatures, expired URLs and missing blobs all read as not found.
    pub async fn open_signed(
        &self,
        name: &str,
        expiry: Option<i64>,
        sig: Option<&str>,
    ) -> Result<StoredBlob, DomainError> {
        let (Some(expiry), Some(sig)) = (expiry, sig) else {
            return Err(DomainError::BlobNotFound);
        };
        if !is_valid_blob_name(name) || !self.signer.verify(name, expiry, sig, Utc::now()) {
            debug!(blob = %name, "rejected blob signature");
            return Err(DomainError::BlobNotFound);
        }
        self.store
            .get(name)
            .await
            .map_err(DomainError::storage)?
            .ok_or(DomainError::BlobNotFound)
    }

    /// Resolve a full URL issued by this service, or `None` when the URL
    /// points elsewhere.
    pub async fn open_own_url(&self, raw: &str) -> Option<Result<StoredBlob, DomainError>> {
        let name = self.signer.blob_name(raw)?;
        let parsed = url::Url::parse(raw).ok()?;
        let mut expiry = None;
        let mut sig = None;
        for (k, v) in parsed.query_pairs() {
            match k.as_ref() {
                "se" => expiry = v.parse::<i64>().ok(),
                "sig" => sig = Some(v.into_owned()),
                _ => {}
            }
        }
        Some(self.open_signed(&name, expiry, sig.as_deref()).await)
    }
}

/// Accept only `image/*`; when the type is missing or generic, infer it from
/// the file name.
fn resolve_image_type(
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<String, DomainError> {
    let declared = content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream");

    let resolved = match declared {
        Some(ct) => ct.to_owned(),
        None => file_name
            .and_then(image_type_from_file_name)
            .map(str::to_owned)
            .ok_or_else(|| {
                DomainError::validation(AssetFields::IMAGE, "cannot determine image type")
            })?,
    };

    match resolved.parse::<mime::Mime>() {
        Ok(m) if m.type_() == mime::IMAGE => Ok(resolved),
        _ => Err(DomainError::validation(
            AssetFields::IMAGE,
            format!("unsupported content type '{resolved}'"),
        )),
    }
}

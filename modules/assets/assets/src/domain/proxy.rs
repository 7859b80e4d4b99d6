use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bytes::BytesMut;
use tracing::{debug, instrument, warn};

use super::blob::StoredBlob;
use super::error::DomainError;
use super::fields::AssetFields;
use super::images::ImageService;

/// Fetches allow-listed image URLs on behalf of an authenticated caller.
pub struct ImageProxy {
    client: reqwest::Client,
    images: Arc<ImageService>,
    allowed_prefixes: Vec<String>,
    max_bytes: usize,
}

impl ImageProxy {
    /// An empty `allowed_prefixes` list allows only this server's blob URLs.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        images: Arc<ImageService>,
        allowed_prefixes: Vec<String>,
        timeout_secs: u64,
        max_bytes: usize,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("failed to build proxy HTTP client")?;
        let allowed_prefixes = if allowed_prefixes.is_empty() {
            vec![images.signer().blob_url_prefix()]
        } else {
            allowed_prefixes
                .into_iter()
                .map(|p| url::Url::parse(&p).map_or(p, String::from))
                .collect()
        };
        Ok(Self {
            client,
            images,
            allowed_prefixes,
            max_bytes,
        })
    }

    #[instrument(skip(self), fields(url = %raw))]
    pub async fn fetch(&self, raw: &str) -> Result<StoredBlob, DomainError> {
        let url = url::Url::parse(raw)
            .map_err(|e| DomainError::validation(AssetFields::URL, format!("invalid url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::validation(
                AssetFields::URL,
                "only http and https urls are supported",
            ));
        }
        // Dot segments are already resolved here, so the check sees the path actually requested.
        if !self
            .allowed_prefixes
            .iter()
            .any(|p| url.as_str().starts_with(p.as_str()))
        {
            return Err(DomainError::validation(
                AssetFields::URL,
                "url is not an allowed image location",
            ));
        }

        if let Some(local) = self.images.open_own_url(url.as_str()).await {
            debug!("serving proxied image from local blob store");
            return local;
        }

        let mut response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "image proxy request failed");
            DomainError::Upstream(e.to_string())
        })?;

        let status = response.status();
        if status.is_redirection() {
            warn!(%status, "image proxy upstream redirect refused");
            return Err(DomainError::Upstream(format!("upstream redirected with {status}")));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DomainError::UpstreamNotFound);
        }
        if !status.is_success() {
            warn!(%status, "image proxy upstream error");
            return Err(DomainError::Upstream(format!("upstream returned {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_owned();

        if response
            .content_length()
            .is_some_and(|len| len > u64::try_from(self.max_bytes).unwrap_or(u64::MAX))
        {
            return Err(self.too_large());
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| DomainError::Upstream(e.to_string()))?
        {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(self.too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(StoredBlob {
            bytes: body.freeze(),
            content_type,
        })
    }

    fn too_large(&self) -> DomainError {
        DomainError::Upstream(format!(
            "upstream image exceeds maximum size of {} bytes",
            self.max_bytes
        ))
    }
}

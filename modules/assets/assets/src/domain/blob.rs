//! Blob storage contract and image blob naming.
//!
//! An upload produces `<uuid>-high.jpg` and `<uuid>-low.jpg`; a degraded
//! upload produces a single `<uuid>-original.<ext>`. Either rendition name
//! is enough to find its sibling.

use async_trait::async_trait;
use bytes::Bytes;

const HIGH_SUFFIX: &str = "-high.jpg";
const LOW_SUFFIX: &str = "-low.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub bytes: Bytes,
    pub content_type: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, name: &str, bytes: Bytes, content_type: &str) -> anyhow::Result<()>;

    async fn get(&self, name: &str) -> anyhow::Result<Option<StoredBlob>>;

    /// Returns `false` when nothing was stored under `name`.
    async fn delete(&self, name: &str) -> anyhow::Result<bool>;
}

/// Names are flat: ASCII alphanumerics plus `-`, `_` and a non-leading `.`.
#[must_use]
pub fn is_valid_blob_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 128
        && !name.starts_with('.')
        && !name.contains("..")
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

#[must_use]
pub fn rendition_names(stem: &str) -> (String, String) {
    (format!("{stem}{HIGH_SUFFIX}"), format!("{stem}{LOW_SUFFIX}"))
}

#[must_use]
pub fn original_name(stem: &str, ext: &str) -> String {
    format!("{stem}-original.{ext}")
}

/// The blob itself plus its sibling rendition, if the name has one.
#[must_use]
pub fn with_sibling(name: &str) -> Vec<String> {
    if let Some(stem) = name.strip_suffix(HIGH_SUFFIX) {
        vec![name.to_owned(), format!("{stem}{LOW_SUFFIX}")]
    } else if let Some(stem) = name.strip_suffix(LOW_SUFFIX) {
        vec![format!("{stem}{HIGH_SUFFIX}"), name.to_owned()]
    } else {
        vec![name.to_owned()]
    }
}

/// MIME type served for a stored blob, from its extension.
#[must_use]
pub fn content_type_for_name(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Image MIME type inferred from a file name, for parts sent without one.
#[must_use]
pub fn image_type_from_file_name(file_name: &str) -> Option<&'static str> {
    match content_type_for_name(file_name) {
        "application/octet-stream" => None,
        ct => Some(ct),
    }
}

/// File extension for an image MIME type; used to name degraded uploads.
#[must_use]
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    let essence = content_type
        .parse::<mime::Mime>()
        .map(|m| m.essence_str().to_owned())
        .unwrap_or_default();
    match essence.as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "image/heic" => "heic",
        _ => "bin",
    }
}

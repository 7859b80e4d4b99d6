use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;

/// Configuration for the assets module (`modules.assets`).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    #[serde(default = "default_max_field_length")]
    pub max_field_length: usize,
    #[serde(default = "default_max_description_length")]
    pub max_description_length: usize,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub blob: BlobConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            max_field_length: default_max_field_length(),
            max_description_length: default_max_description_length(),
            max_upload_bytes: default_max_upload_bytes(),
            blob: BlobConfig::default(),
            proxy: ProxyConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobBackend {
    #[default]
    Fs,
    Memory,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlobConfig {
    #[serde(default)]
    pub backend: BlobBackend,
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
    /// Externally reachable base URL of this server; signed URLs are built on it.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// HMAC key for signed URLs. A random per-process key is used when unset,
    /// which invalidates issued URLs on restart.
    #[serde(default)]
    pub signing_key: Option<SecretString>,
    #[serde(default = "default_signed_url_ttl_days")]
    pub signed_url_ttl_days: u64,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            backend: BlobBackend::default(),
            root_dir: default_root_dir(),
            public_base_url: default_public_base_url(),
            signing_key: None,
            signed_url_ttl_days: default_signed_url_ttl_days(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
    /// URL prefixes the proxy may fetch. Empty means the blob public base URL.
    #[serde(default)]
    pub allowed_prefixes: Vec<String>,
    #[serde(default = "default_proxy_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_proxy_max_bytes")]
    pub max_bytes: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            allowed_prefixes: Vec::new(),
            timeout_secs: default_proxy_timeout_secs(),
            max_bytes: default_proxy_max_bytes(),
        }
    }
}

fn default_max_field_length() -> usize {
    200
}

fn default_max_description_length() -> usize {
    4000
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("data/blobs")
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_owned()
}

fn default_signed_url_ttl_days() -> u64 {
    365
}

fn default_proxy_timeout_secs() -> u64 {
    30
}

fn default_proxy_max_bytes() -> usize {
    20 * 1024 * 1024
}

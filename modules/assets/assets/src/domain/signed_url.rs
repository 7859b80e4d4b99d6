//! Time-limited signed blob URLs.
//!
//! `<base>/blobs/<name>?se=<unix-expiry>&sig=<hex>` where `sig` is
//! HMAC-SHA256 over `"<name>\n<se>"`.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use super::blob::is_valid_blob_name;

type HmacSha256 = Hmac<Sha256>;

pub const BLOB_ROUTE_SEGMENT: &str = "blobs";

pub struct UrlSigner {
    keyed_mac: HmacSha256,
    public_base_url: String,
    ttl: Duration,
}

impl UrlSigner {
    /// # Errors
    /// Returns an error when the key is rejected by the MAC or the TTL is
    /// out of range.
    pub fn new(key: &SecretString, public_base_url: &str, ttl_days: u64) -> anyhow::Result<Self> {
        let keyed_mac = HmacSha256::new_from_slice(key.expose_secret().as_bytes())
            .map_err(|e| anyhow::anyhow!("invalid signing key: {e}"))?;
        let ttl = i64::try_from(ttl_days)
            .ok()
            .and_then(Duration::try_days)
            .ok_or_else(|| anyhow::anyhow!("signed_url_ttl_days out of range: {ttl_days}"))?;
        Ok(Self {
            keyed_mac,
            public_base_url: url::Url::parse(public_base_url)
                .map_or_else(|_| public_base_url.to_owned(), String::from)
                .trim_end_matches('/')
                .to_owned(),
            ttl,
        })
    }

    /// Prefix shared by every URL this signer issues.
    #[must_use]
    pub fn blob_url_prefix(&self) -> String {
        format!("{}/{BLOB_ROUTE_SEGMENT}/", self.public_base_url)
    }

    #[must_use]
    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    /// Blob name behind a URL this server issued. Other hosts and paths yield `None`.
    #[must_use]
    pub fn blob_name(&self, raw: &str) -> Option<String> {
        let parsed = url::Url::parse(raw).ok()?;
        let rest = parsed.as_str().strip_prefix(&self.blob_url_prefix())?;
        let name = rest.split(['?', '#']).next()?;
        is_valid_blob_name(name).then(|| name.to_owned())
    }

    #[must_use]
    pub fn sign(&self, name: &str, now: DateTime<Utc>) -> String {
        let expiry = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .timestamp();
        let sig = hex::encode(self.mac(name, expiry).finalize().into_bytes());
        format!("{}{name}?se={expiry}&sig={sig}", self.blob_url_prefix())
    }

    /// Check signature and expiry for a blob request.
    #[must_use]
    pub fn verify(&self, name: &str, expiry: i64, sig_hex: &str, now: DateTime<Utc>) -> bool {
        if expiry < now.timestamp() {
            return false;
        }
        let Ok(sig) = hex::decode(sig_hex) else {
            return false;
        };
        self.mac(name, expiry).verify_slice(&sig).is_ok()
    }

    fn mac(&self, name: &str, expiry: i64) -> HmacSha256 {
        let mut mac = self.keyed_mac.clone();
        mac.update(name.as_bytes());
        mac.update(b"\n");
        mac.update(expiry.to_string().as_bytes());
        mac
    }
}

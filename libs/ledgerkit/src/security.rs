//! Request principal.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

/// Authenticated caller of a protected route.
///
/// Every asset is partitioned by `household_id`; preferences are keyed by
/// `user_id`. For principals coming from the platform header both are the
/// same identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id: String,
    household_id: String,
    identity_provider: Option<String>,
    user_details: Option<String>,
    roles: Vec<String>,
}

impl Principal {
    #[must_use]
    pub fn new(user_id: impl Into<String>, household_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            household_id: household_id.into(),
            identity_provider: None,
            user_details: None,
            roles: Vec::new(),
        }
    }

    /// Principal whose user and household are the same id.
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self::new(user_id.clone(), user_id)
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn household_id(&self) -> &str {
        &self.household_id
    }

    #[must_use]
    pub fn identity_provider(&self) -> Option<&str> {
        self.identity_provider.as_deref()
    }

    #[must_use]
    pub fn user_details(&self) -> Option<&str> {
        self.user_details.as_deref()
    }

    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

/// Decoded `x-ms-client-principal` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPrincipal {
    #[serde(default)]
    pub identity_provider: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_details: Option<String>,
    #[serde(default)]
    pub user_roles: Vec<String>,
}

impl ClientPrincipal {
    /// Decode the base64 JSON header value.
    ///
    /// # Errors
    /// Returns a message when the value is not base64, not JSON, or carries
    /// no usable `userId`.
    pub fn decode(raw: &str) -> Result<Self, String> {
        let bytes = STANDARD
            .decode(raw.trim())
            .map_err(|e| format!("principal is not valid base64: {e}"))?;
        let decoded: Self = serde_json::from_slice(&bytes)
            .map_err(|e| format!("principal is not valid JSON: {e}"))?;
        match decoded.user_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(decoded),
            _ => Err("principal has no userId".to_owned()),
        }
    }

    #[must_use]
    pub fn into_principal(self) -> Principal {
        let user_id = self.user_id.unwrap_or_default().trim().to_owned();
        Principal {
            household_id: user_id.clone(),
            user_id,
            identity_provider: self.identity_provider,
            user_details: self.user_details,
            roles: self.user_roles,
        }
    }
}

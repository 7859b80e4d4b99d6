//! Axum extractor and middleware for principal resolution

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::problem::{Problem, internal_error, unauthorized};
use crate::security::{ClientPrincipal, Principal};

pub const CLIENT_PRINCIPAL_HEADER: &str = "x-ms-client-principal";
pub const HOUSEHOLD_ID_HEADER: &str = "x-household-id";
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Accept `x-household-id` / `x-user-id` when no platform principal is
    /// present. Local development only.
    pub allow_dev_headers: bool,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required: missing principal")]
    Unauthenticated,

    #[error("Invalid principal: {0}")]
    InvalidPrincipal(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for Problem {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthenticated | AuthError::InvalidPrincipal(_) => {
                unauthorized(e.to_string()).with_code("auth.unauthenticated")
            }
            AuthError::Internal(_) => {
                tracing::error!(error = %e, "auth pipeline misconfigured");
                internal_error(e.to_string()).with_code("auth.internal")
            }
        }
        .with_current_trace()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        Problem::from(self).into_response()
    }
}

/// Resolve the caller from request headers.
///
/// # Errors
/// `InvalidPrincipal` when the platform header is present but unusable,
/// `Unauthenticated` when no accepted identity is present.
pub fn resolve_principal(cfg: &AuthConfig, headers: &HeaderMap) -> Result<Principal, AuthError> {
    if let Some(raw) = headers.get(CLIENT_PRINCIPAL_HEADER) {
        let raw = raw
            .to_str()
            .map_err(|_| AuthError::InvalidPrincipal("header is not ASCII".to_owned()))?;
        let decoded = ClientPrincipal::decode(raw).map_err(AuthError::InvalidPrincipal)?;
        return Ok(decoded.into_principal());
    }

    if cfg.allow_dev_headers {
        let household = header_str(headers, HOUSEHOLD_ID_HEADER);
        if let Some(household) = household {
            let user = header_str(headers, USER_ID_HEADER).unwrap_or(household);
            return Ok(Principal::new(user, household));
        }
    }

    Err(AuthError::Unauthenticated)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[derive(Clone)]
pub struct AuthState {
    config: Arc<AuthConfig>,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Auth middleware for protected routes.
///
/// Preflight requests pass through untouched. Everything else must resolve
/// to a [`Principal`], which is stored in the request extensions.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    if is_preflight_request(request.method(), request.headers()) {
        return next.run(request).await;
    }

    match resolve_principal(&state.config, request.headers()) {
        Ok(principal) => {
            tracing::debug!(user_id = principal.user_id(), "principal resolved");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!("rejecting request: {err}");
            err.into_response()
        }
    }
}

fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(axum::http::header::ORIGIN)
        && headers.contains_key(axum::http::header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Extractor for the [`Principal`] inserted by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct Authz(pub Principal);

impl<S> FromRequestParts<S> for Authz
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(Authz)
            .ok_or(AuthError::Internal(
                "Principal not found - auth middleware not configured".to_owned(),
            ))
    }
}

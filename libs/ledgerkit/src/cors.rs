use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            allowed_headers: vec!["*".to_owned()],
            allow_credentials: false,
            max_age_seconds: 600,
        }
    }
}

/// Build a CORS layer from config. Returns None if config has no cors section.
#[must_use]
pub fn build_cors_layer(cfg: Option<&CorsConfig>) -> Option<CorsLayer> {
    let cors_cfg = cfg?.clone();

    let mut layer = CorsLayer::new();

    if cors_cfg.allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_cfg
            .allowed_origins
            .into_iter()
            .filter_map(|s| axum::http::HeaderValue::from_str(&s).ok())
            .collect();
        if !origins.is_empty() {
            layer = layer.allow_origin(origins);
        }
    }

    if cors_cfg.allowed_methods.iter().any(|m| m == "*") {
        layer = layer.allow_methods(Any);
    } else {
        let methods: Vec<axum::http::Method> = cors_cfg
            .allowed_methods
            .into_iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !methods.is_empty() {
            layer = layer.allow_methods(methods);
        }
    }

    if cors_cfg.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<axum::http::HeaderName> = cors_cfg
            .allowed_headers
            .into_iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !headers.is_empty() {
            layer = layer.allow_headers(headers);
        }
    }

    // credentials cannot be combined with wildcard origins
    if cors_cfg.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    if cors_cfg.max_age_seconds > 0 {
        layer = layer.max_age(std::time::Duration::from_secs(cors_cfg.max_age_seconds));
    }

    Some(layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_section_means_no_layer() {
        assert!(build_cors_layer(None).is_none());
    }

    #[test]
    fn explicit_origins_build_a_layer() {
        let cfg = CorsConfig {
            allowed_origins: vec!["https://app.example.com".to_owned()],
            allowed_headers: vec!["content-type".to_owned(), "x-household-id".to_owned()],
            ..CorsConfig::default()
        };
        assert!(build_cors_layer(Some(&cfg)).is_some());
    }
}

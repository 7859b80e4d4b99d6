//! Router assembly and startup wiring for the HomeLedger server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use assets::AssetsModule;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use insurance_advisor::AdvisorModule;
use ledgerkit::auth::{AuthState, auth_middleware};
use ledgerkit::config::{AppConfig, DatabaseConfig};
use ledgerkit::cors::build_cors_layer;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use user_preferences::PreferencesModule;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Every module, initialized and ready to serve.
pub struct Modules {
    pub assets: AssetsModule,
    pub preferences: PreferencesModule,
    pub advisor: AdvisorModule,
}

/// # Errors
/// Returns an error if the database is unreachable.
pub async fn connect_database(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    opts.max_connections(cfg.max_connections).sqlx_logging(false);
    Database::connect(opts)
        .await
        .context("failed to connect to database")
}

/// Run every module's migrations.
///
/// # Errors
/// Returns the first migration failure.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    AssetsModule::migrate(db).await?;
    PreferencesModule::migrate(db).await?;
    Ok(())
}

/// Decode each module's config section and wire the modules together.
///
/// # Errors
/// Returns an error if a module section is invalid or a module fails to start.
pub async fn init_modules(config: &AppConfig, db: &DatabaseConnection) -> anyhow::Result<Modules> {
    let assets = AssetsModule::init(
        config.module_config(assets::module::MODULE_NAME)?,
        db.clone(),
    )
    .await?;
    let preferences = PreferencesModule::init(
        config.module_config(user_preferences::module::MODULE_NAME)?,
        db.clone(),
    );
    let advisor = AdvisorModule::init(
        &config.module_config(insurance_advisor::module::MODULE_NAME)?,
        assets.api(),
        preferences.api(),
    )?;
    Ok(Modules {
        assets,
        preferences,
        advisor,
    })
}

/// Merged `OpenAPI` document of all modules.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = AssetsModule::openapi();
    doc.merge(PreferencesModule::openapi());
    doc.merge(AdvisorModule::openapi());
    doc.info.title = "HomeLedger API".to_owned();
    doc.info.version = env!("CARGO_PKG_VERSION").to_owned();
    doc
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the full application router.
///
/// Request flow, outermost first: request id, trace, timeout, body limit,
/// CORS, then auth on protected routes only.
#[must_use]
pub fn build_app(config: &AppConfig, modules: &Modules) -> Router {
    let auth_state = AuthState::new(config.auth.clone());
    let protected = Router::new()
        .merge(modules.assets.protected_router())
        .merge(modules.preferences.protected_router())
        .merge(modules.advisor.protected_router())
        .route_layer(from_fn_with_state(auth_state, auth_middleware));

    let doc = Arc::new(openapi());
    let public = Router::new()
        .route("/health", get(health))
        .route(
            "/openapi.json",
            get(move || {
                let doc = doc.clone();
                async move { Json(doc.as_ref().clone()) }
            }),
        )
        .merge(modules.assets.public_router());

    let mut router = public.merge(protected);

    if let Some(cors) = build_cors_layer(config.cors.as_ref()) {
        router = router.layer(cors);
    }

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router
        .layer(DefaultBodyLimit::max(config.server.body_limit_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http().make_span_with(
            |req: &axum::http::Request<axum::body::Body>| {
                let request_id = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    request_id = %request_id,
                )
            },
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use user_preferences_sdk::UserPreferencesApi;
use utoipa::OpenApi;

use crate::api::rest::routes::{self, PreferencesApiDoc};
use crate::config::PreferencesConfig;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::storage::{Migrator, SeaOrmPreferencesRepository};
use crate::local_client::LocalClient;

pub const MODULE_NAME: &str = "user_preferences";

pub struct PreferencesModule {
    service: Arc<Service>,
}

impl PreferencesModule {
    /// # Errors
    /// Returns an error if a migration fails.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running user preferences database migrations");
        Migrator::up(db, None)
            .await
            .context("user preferences migrations failed")?;
        Ok(())
    }

    #[must_use]
    pub fn init(cfg: PreferencesConfig, db: DatabaseConnection) -> Self {
        info!(
            default_language = %cfg.default_language,
            "Initializing user preferences module"
        );
        let repo = Arc::new(SeaOrmPreferencesRepository::new(db));
        let service = Arc::new(Service::new(
            repo,
            ServiceConfig {
                default_dark_mode: cfg.default_dark_mode,
                default_language: cfg.default_language,
            },
        ));
        Self { service }
    }

    #[must_use]
    pub fn api(&self) -> Arc<dyn UserPreferencesApi> {
        Arc::new(LocalClient::new(self.service.clone()))
    }

    #[must_use]
    pub fn protected_router(&self) -> Router {
        routes::router(self.service.clone())
    }

    #[must_use]
    pub fn openapi() -> utoipa::openapi::OpenApi {
        PreferencesApiDoc::openapi()
    }
}

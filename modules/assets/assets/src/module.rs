use std::sync::Arc;

use anyhow::Context;
use assets_sdk::AssetsApi;
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use secrecy::SecretString;
use tracing::{info, warn};
use utoipa::OpenApi;

use crate::api::rest::routes::{self, AssetsApiDoc};
use crate::config::{AssetsConfig, BlobBackend};
use crate::domain::blob::BlobStore;
use crate::domain::images::ImageService;
use crate::domain::proxy::ImageProxy;
use crate::domain::service::{Service, ServiceConfig};
use crate::domain::signed_url::UrlSigner;
use crate::infra::blob::{FsBlobStore, MemoryBlobStore};
use crate::infra::storage::{Migrator, SeaOrmAssetsRepository};
use crate::local_client::LocalClient;

pub const MODULE_NAME: &str = "assets";

/// Wired assets module: service, image proxy and their routers.
pub struct AssetsModule {
    service: Arc<Service>,
    proxy: Arc<ImageProxy>,
    max_upload_bytes: usize,
}

impl AssetsModule {
    /// Apply this module's schema migrations.
    ///
    /// # Errors
    /// Returns an error if a migration fails.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running assets database migrations");
        Migrator::up(db, None)
            .await
            .context("assets migrations failed")?;
        Ok(())
    }

    /// # Errors
    /// Returns an error if the blob store, signer or proxy client cannot be
    /// created.
    pub async fn init(cfg: AssetsConfig, db: DatabaseConnection) -> anyhow::Result<Self> {
        info!(backend = ?cfg.blob.backend, "Initializing assets module");

        let store: Arc<dyn BlobStore> = match cfg.blob.backend {
            BlobBackend::Fs => Arc::new(FsBlobStore::open(&cfg.blob.root_dir).await?),
            BlobBackend::Memory => Arc::new(MemoryBlobStore::new()),
        };

        let key = if let Some(key) = cfg.blob.signing_key {
            key
        } else {
            warn!("no blob signing key configured; image URLs will not survive a restart");
            ephemeral_key()
        };
        let signer = Arc::new(UrlSigner::new(
            &key,
            &cfg.blob.public_base_url,
            cfg.blob.signed_url_ttl_days,
        )?);

        let images = Arc::new(ImageService::new(store, signer, cfg.max_upload_bytes));
        let proxy = Arc::new(ImageProxy::new(
            images.clone(),
            cfg.proxy.allowed_prefixes,
            cfg.proxy.timeout_secs,
            cfg.proxy.max_bytes,
        )?);

        let repo = Arc::new(SeaOrmAssetsRepository::new(db));
        let service = Arc::new(Service::new(
            repo,
            images,
            ServiceConfig {
                max_field_length: cfg.max_field_length,
                max_description_length: cfg.max_description_length,
            },
        ));

        info!("Assets module initialized");
        Ok(Self {
            service,
            proxy,
            max_upload_bytes: cfg.max_upload_bytes,
        })
    }

    /// Client for other modules.
    #[must_use]
    pub fn api(&self) -> Arc<dyn AssetsApi> {
        Arc::new(LocalClient::new(self.service.clone()))
    }

    /// Routes that require an authenticated principal.
    #[must_use]
    pub fn protected_router(&self) -> Router {
        routes::protected_router(
            self.service.clone(),
            self.proxy.clone(),
            self.max_upload_bytes,
        )
    }

    #[must_use]
    pub fn public_router(&self) -> Router {
        routes::public_router(self.service.clone())
    }

    #[must_use]
    pub fn openapi() -> utoipa::openapi::OpenApi {
        AssetsApiDoc::openapi()
    }
}

fn ephemeral_key() -> SecretString {
    // two v4 uuids carry 244 random bits
    SecretString::from(format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    ))
}

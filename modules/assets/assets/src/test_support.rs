use std::sync::Arc;

use assets_sdk::models::{Asset, ImageUrls};
use chrono::Utc;
use ledgerkit::Principal;
use secrecy::SecretString;
use uuid::Uuid;

use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

use crate::domain::images::ImageService;
use crate::domain::service::{Service, ServiceConfig};
use crate::domain::signed_url::UrlSigner;
use crate::infra::blob::MemoryBlobStore;
use crate::infra::storage::{Migrator, SeaOrmAssetsRepository};

pub const BASE_URL: &str = "http://ledger.test";

pub fn principal(household: &str) -> Principal {
    Principal::for_user(household)
}

pub fn signer() -> Arc<UrlSigner> {
    Arc::new(UrlSigner::new(&SecretString::from("unit-test-key"), BASE_URL, 365).unwrap())
}

pub fn memory_images(max_upload_bytes: usize) -> (Arc<MemoryBlobStore>, Arc<ImageService>) {
    let store = Arc::new(MemoryBlobStore::new());
    let images = Arc::new(ImageService::new(
        store.clone(),
        signer(),
        max_upload_bytes,
    ));
    (store, images)
}

pub fn asset(household: &str, make: &str, value: f64) -> Asset {
    let now = Utc::now();
    Asset {
        id: Uuid::new_v4(),
        household_id: household.to_owned(),
        make: make.to_owned(),
        model: "Model".to_owned(),
        serial_number: None,
        description: None,
        category: None,
        value,
        purchase_date: None,
        image_url: None,
        image_urls: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

pub fn blob_url(name: &str) -> String {
    signer().sign(name, Utc::now())
}

pub fn pair(stem: &str) -> ImageUrls {
    ImageUrls {
        high: blob_url(&format!("{stem}-high.jpg")),
        low: blob_url(&format!("{stem}-low.jpg")),
    }
}

/// Service over a migrated in-memory SQLite database and a memory blob store.
pub async fn sqlite_service(max_upload_bytes: usize) -> (Arc<Service>, Arc<MemoryBlobStore>) {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let (store, images) = memory_images(max_upload_bytes);
    let repo = Arc::new(SeaOrmAssetsRepository::new(db));
    (
        Arc::new(Service::new(repo, images, ServiceConfig::default())),
        store,
    )
}

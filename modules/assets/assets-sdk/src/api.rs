//! `AssetsApi` trait definition.
//!
//! Every call is scoped to the caller's household; an id from another
//! household behaves as missing.

use async_trait::async_trait;
use ledgerkit::Principal;
use uuid::Uuid;

use crate::errors::AssetsError;
use crate::models::{Asset, AssetPatch, NewAsset, PortfolioSummary};

/// Public API trait for the assets module.
///
/// The server wires a `LocalClient` implementation into consumers such as
/// the insurance advisor:
/// ```ignore
/// let assets: Arc<dyn AssetsApi> = Arc::new(assets::LocalClient::new(service));
/// let catalog = assets.list_assets(&principal).await?;
/// ```
#[async_trait]
pub trait AssetsApi: Send + Sync {
    /// Assets of the caller's household, newest first.
    async fn list_assets(&self, principal: &Principal) -> Result<Vec<Asset>, AssetsError>;

    async fn get_asset(&self, principal: &Principal, id: Uuid) -> Result<Asset, AssetsError>;

    async fn create_asset(
        &self,
        principal: &Principal,
        new_asset: NewAsset,
    ) -> Result<Asset, AssetsError>;

    async fn update_asset(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: AssetPatch,
    ) -> Result<Asset, AssetsError>;

    /// Delete the asset and, best-effort, its images.
    async fn delete_asset(&self, principal: &Principal, id: Uuid) -> Result<(), AssetsError>;

    async fn portfolio_summary(
        &self,
        principal: &Principal,
    ) -> Result<PortfolioSummary, AssetsError>;
}

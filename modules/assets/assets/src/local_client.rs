use assets_sdk::{
    Asset, AssetPatch, AssetsApi, AssetsError, NewAsset, PortfolioSummary,
};
use async_trait::async_trait;
use ledgerkit::Principal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::service::Service;

/// In-process `AssetsApi` backed by the module's service.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AssetsApi for LocalClient {
    async fn list_assets(&self, principal: &Principal) -> Result<Vec<Asset>, AssetsError> {
        self.service.list_assets(principal).await.map_err(Into::into)
    }

    async fn get_asset(&self, principal: &Principal, id: Uuid) -> Result<Asset, AssetsError> {
        self.service
            .get_asset(principal, id)
            .await
            .map_err(Into::into)
    }

    async fn create_asset(
        &self,
        principal: &Principal,
        new_asset: NewAsset,
    ) -> Result<Asset, AssetsError> {
        self.service
            .create_asset(principal, new_asset)
            .await
            .map_err(Into::into)
    }

    async fn update_asset(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: AssetPatch,
    ) -> Result<Asset, AssetsError> {
        self.service
            .update_asset(principal, id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_asset(&self, principal: &Principal, id: Uuid) -> Result<(), AssetsError> {
        self.service
            .delete_asset(principal, id)
            .await
            .map_err(Into::into)
    }

    async fn portfolio_summary(
        &self,
        principal: &Principal,
    ) -> Result<PortfolioSummary, AssetsError> {
        self.service
            .portfolio_summary(principal)
            .await
            .map_err(Into::into)
    }
}

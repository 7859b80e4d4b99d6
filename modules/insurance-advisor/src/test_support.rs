use std::sync::{Arc, Mutex};

use assets_sdk::{Asset, AssetPatch, AssetsApi, AssetsError, NewAsset, PortfolioSummary};
use async_trait::async_trait;
use chrono::Utc;
use ledgerkit::Principal;
use user_preferences_sdk::{
    PreferencesError, PreferencesPatch, UserPreferences, UserPreferencesApi,
};
use uuid::Uuid;

use crate::domain::ports::ChatModel;
use crate::domain::service::Service;

pub fn stored_asset(make: &str, category: Option<&str>, value: f64) -> Asset {
    let now = Utc::now();
    Asset {
        id: Uuid::new_v4(),
        household_id: "house-1".to_owned(),
        make: make.to_owned(),
        model: "Model".to_owned(),
        serial_number: None,
        description: None,
        category: category.map(str::to_owned),
        value,
        purchase_date: None,
        image_url: None,
        image_urls: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

/// Catalog stub; `None` makes every call fail.
pub struct MockAssets(pub Option<Vec<Asset>>);

#[async_trait]
impl AssetsApi for MockAssets {
    async fn list_assets(&self, _principal: &Principal) -> Result<Vec<Asset>, AssetsError> {
        self.0.clone().ok_or_else(AssetsError::internal)
    }

    async fn get_asset(&self, _principal: &Principal, _id: Uuid) -> Result<Asset, AssetsError> {
        Err(AssetsError::not_found())
    }

    async fn create_asset(
        &self,
        _principal: &Principal,
        _new_asset: NewAsset,
    ) -> Result<Asset, AssetsError> {
        Err(AssetsError::internal())
    }

    async fn update_asset(
        &self,
        _principal: &Principal,
        _id: Uuid,
        _patch: AssetPatch,
    ) -> Result<Asset, AssetsError> {
        Err(AssetsError::internal())
    }

    async fn delete_asset(&self, _principal: &Principal, _id: Uuid) -> Result<(), AssetsError> {
        Err(AssetsError::not_found())
    }

    async fn portfolio_summary(
        &self,
        _principal: &Principal,
    ) -> Result<PortfolioSummary, AssetsError> {
        Err(AssetsError::internal())
    }
}

/// Preferences stub; `None` makes reads fail.
pub struct MockPreferences(pub Option<String>);

#[async_trait]
impl UserPreferencesApi for MockPreferences {
    async fn get_preferences(
        &self,
        principal: &Principal,
    ) -> Result<UserPreferences, PreferencesError> {
        let language = self.0.clone().ok_or_else(PreferencesError::internal)?;
        Ok(UserPreferences {
            user_id: principal.user_id().to_owned(),
            dark_mode: false,
            language,
            updated_at: None,
        })
    }

    async fn update_preferences(
        &self,
        _principal: &Principal,
        _patch: PreferencesPatch,
    ) -> Result<UserPreferences, PreferencesError> {
        Err(PreferencesError::internal())
    }
}

/// Records each call and answers with a fixed reply or an error.
pub struct MockChatModel {
    reply: Option<String>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl MockChatModel {
    pub fn answering(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_owned()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> anyhow::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_owned(), user_message.to_owned()));
        self.reply
            .clone()
            .ok_or_else(|| anyhow::anyhow!("connection refused"))
    }
}

pub fn service(
    llm: Option<Arc<dyn ChatModel>>,
    assets: Option<Vec<Asset>>,
    language: Option<&str>,
) -> Service {
    Service::new(
        llm,
        Arc::new(MockAssets(assets)),
        Arc::new(MockPreferences(language.map(str::to_owned))),
    )
}

pub fn principal() -> Principal {
    Principal::for_user("house-1")
}

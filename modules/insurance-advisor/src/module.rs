use std::sync::Arc;

use assets_sdk::AssetsApi;
use axum::Router;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};
use user_preferences_sdk::UserPreferencesApi;
use utoipa::OpenApi;

use crate::api::rest::routes::{self, AdvisorApiDoc};
use crate::config::AdvisorConfig;
use crate::domain::ports::ChatModel;
use crate::domain::service::Service;
use crate::infra::llm::OpenAiChatClient;

pub const MODULE_NAME: &str = "insurance_advisor";

pub struct AdvisorModule {
    service: Arc<Service>,
}

impl AdvisorModule {
    /// # Errors
    /// Returns an error if the chat HTTP client cannot be built.
    pub fn init(
        cfg: &AdvisorConfig,
        assets: Arc<dyn AssetsApi>,
        preferences: Arc<dyn UserPreferencesApi>,
    ) -> anyhow::Result<Self> {
        let api_key = cfg
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().trim())
            .filter(|k| !k.is_empty())
            .map(SecretString::from);

        let llm: Option<Arc<dyn ChatModel>> = match api_key {
            Some(key) => {
                info!(model = %cfg.model, base_url = %cfg.base_url, "Chat model enabled");
                Some(Arc::new(OpenAiChatClient::new(cfg, key)?))
            }
            None => {
                warn!("no chat API key configured; answering with canned advice");
                None
            }
        };

        Ok(Self {
            service: Arc::new(Service::new(llm, assets, preferences)),
        })
    }

    #[must_use]
    pub fn protected_router(&self) -> Router {
        routes::router(self.service.clone())
    }

    #[must_use]
    pub fn openapi() -> utoipa::openapi::OpenApi {
        AdvisorApiDoc::openapi()
    }
}

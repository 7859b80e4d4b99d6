use std::sync::Arc;

use anyhow::Context;
use assets_sdk::AssetsApi;
use ledgerkit::Principal;
use tracing::{debug, info, instrument, warn};
use user_preferences_sdk::{DEFAULT_LANGUAGE, UserPreferencesApi};

use super::canned::canned_response;
use super::error::DomainError;
use super::fields::ChatFields;
use super::language::Language;
use super::locale::{api_key_notice, system_prompt};
use super::models::{AdvisedAsset, CatalogTotals, ChatRequest};
use super::ports::ChatModel;

pub const MAX_MESSAGE_CHARS: usize = 4000;

pub struct Service {
    llm: Option<Arc<dyn ChatModel>>,
    assets: Arc<dyn AssetsApi>,
    preferences: Arc<dyn UserPreferencesApi>,
}

impl Service {
    /// Without `llm` every answer is canned.
    #[must_use]
    pub fn new(
        llm: Option<Arc<dyn ChatModel>>,
        assets: Arc<dyn AssetsApi>,
        preferences: Arc<dyn UserPreferencesApi>,
    ) -> Self {
        Self {
            llm,
            assets,
            preferences,
        }
    }

    #[instrument(skip_all, fields(household_id = %principal.household_id()))]
    pub async fn advise(
        &self,
        principal: &Principal,
        request: ChatRequest,
    ) -> Result<String, DomainError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(DomainError::validation(ChatFields::MESSAGE, "is required"));
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(DomainError::validation(
                ChatFields::MESSAGE,
                format!("must be at most {MAX_MESSAGE_CHARS} characters"),
            ));
        }

        let assets = match request.assets {
            Some(assets) => assets,
            None => self.stored_assets(principal).await?,
        };
        let language = match request.language.as_deref() {
            Some(code) => Language::from_code(code),
            None => self.preferred_language(principal).await,
        };
        debug!(
            assets = assets.len(),
            language = language.code(),
            "advising"
        );

        if let Some(llm) = &self.llm {
            let prompt = system_prompt(language, &assets);
            match llm.complete(&prompt, message).await {
                Ok(answer) => {
                    info!("answered by chat model");
                    return Ok(answer);
                }
                Err(e) => warn!(error = %format!("{e:#}"), "chat model failed, using canned answer"),
            }
        }

        Ok(fallback(language, message, &assets))
    }

    async fn stored_assets(&self, principal: &Principal) -> Result<Vec<AdvisedAsset>, DomainError> {
        let assets = self
            .assets
            .list_assets(principal)
            .await
            .context("failed to load household assets")?;
        Ok(assets.into_iter().map(Into::into).collect())
    }

    /// Saved preference, or English when it cannot be read.
    async fn preferred_language(&self, principal: &Principal) -> Language {
        match self.preferences.get_preferences(principal).await {
            Ok(prefs) => Language::from_code(&prefs.language),
            Err(e) => {
                warn!(error = %e, "could not read language preference");
                Language::from_code(DEFAULT_LANGUAGE)
            }
        }
    }
}

/// Canned English advice, or the localized notice for other languages.
#[must_use]
pub fn fallback(language: Language, message: &str, assets: &[AdvisedAsset]) -> String {
    match api_key_notice(language) {
        Some(notice) => notice.to_owned(),
        None => canned_response(message, CatalogTotals::of(assets)),
    }
}

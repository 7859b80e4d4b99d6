use std::sync::Arc;

use chrono::Utc;
use ledgerkit::Principal;
use tracing::{debug, info, instrument};
use user_preferences_sdk::{PreferencesPatch, UserPreferences};

use super::error::DomainError;
use super::fields::PreferencesFields;
use super::repo::PreferencesRepository;

const MIN_LANGUAGE_LEN: usize = 2;
const MAX_LANGUAGE_LEN: usize = 10;

pub struct ServiceConfig {
    pub default_dark_mode: bool,
    pub default_language: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_dark_mode: false,
            default_language: user_preferences_sdk::DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

pub struct Service {
    repo: Arc<dyn PreferencesRepository>,
    config: ServiceConfig,
}

impl Service {
    #[must_use]
    pub fn new(repo: Arc<dyn PreferencesRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// Stored preferences, or the defaults. Defaults are not persisted.
    #[instrument(skip_all, fields(user_id = %principal.user_id()))]
    pub async fn get_preferences(
        &self,
        principal: &Principal,
    ) -> Result<UserPreferences, DomainError> {
        let stored = self.repo.find(principal.user_id()).await?;
        if stored.is_none() {
            debug!("no stored preferences, returning defaults");
        }
        Ok(stored.unwrap_or_else(|| self.defaults_for(principal.user_id())))
    }

    #[instrument(skip_all, fields(user_id = %principal.user_id()))]
    pub async fn update_preferences(
        &self,
        principal: &Principal,
        patch: PreferencesPatch,
    ) -> Result<UserPreferences, DomainError> {
        let language = patch.language.map(|l| l.trim().to_owned());
        if let Some(language) = language.as_deref() {
            validate_language(language)?;
        }

        let current = self.get_preferences(principal).await?;
        let updated = UserPreferences {
            user_id: current.user_id,
            dark_mode: patch.dark_mode.unwrap_or(current.dark_mode),
            language: language.unwrap_or(current.language),
            updated_at: Some(Utc::now()),
        };

        self.repo.upsert(&updated).await?;
        info!(dark_mode = updated.dark_mode, language = %updated.language, "saved preferences");
        Ok(updated)
    }

    fn defaults_for(&self, user_id: &str) -> UserPreferences {
        UserPreferences {
            user_id: user_id.to_owned(),
            dark_mode: self.config.default_dark_mode,
            language: self.config.default_language.clone(),
            updated_at: None,
        }
    }
}

/// 2 to 10 characters of ASCII letters, digits or `-`, e.g. `en` or `pt-BR`.
fn validate_language(language: &str) -> Result<(), DomainError> {
    let len_ok = (MIN_LANGUAGE_LEN..=MAX_LANGUAGE_LEN).contains(&language.len());
    let chars_ok = language
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-');
    if len_ok && chars_ok {
        Ok(())
    } else {
        Err(DomainError::validation(
            PreferencesFields::LANGUAGE,
            format!(
                "must be {MIN_LANGUAGE_LEN} to {MAX_LANGUAGE_LEN} characters of letters, digits or '-'"
            ),
        ))
    }
}
